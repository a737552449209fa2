//! Reusable timed primitives the show is composed from
pub mod autofit;
pub mod delay;
pub mod fader;
pub mod flash_loop;
pub mod neon;
pub mod typewriter;

pub use autofit::{autofit, AutofitOptions};
pub use delay::{sleep_from, sleep_ms, TaskGroup};
pub use fader::{fade_in, fade_opacity, fade_out};
pub use flash_loop::{FlashLoop, FlashTiming, RangeMs};
pub use neon::{neon_blink, BlinkPhase, BlinkSession, BlinkTiming};
pub use typewriter::{type_line, type_lines, LineTiming, TypedLine};
