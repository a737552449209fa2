//! Timeline-driven reveal show: a quiz answer unlocks a blackout, a typed
//! invitation, neon signs, a scenery reveal and a looping title flash.
pub mod app;
pub mod config;
pub mod effects;
pub mod error;
pub mod event;
pub mod show;
pub mod soundtrack;
pub mod stage;
pub mod ui;
pub mod util;

pub use config::ShowConfig;
pub use error::{Result, RevealError};
pub use show::{Selection, Show, ShowPhase};
pub use soundtrack::{PlayOptions, Soundtrack};
pub use stage::{Element, SceneId, Stage};
