//! The reveal sequence: quiz answer handling, the chained timeline,
//! resize and visibility reactions.
mod begin_reveal;
mod flash;
mod mark_wrong;
mod on_resize;
mod on_visibility;
mod run_cascade;
mod run_step;
mod select_choice;
mod show_speaker;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use crate::config::ShowConfig;
use crate::effects::{FlashLoop, TaskGroup};
use crate::log_info;
use crate::soundtrack::Soundtrack;
use crate::stage::{Element, SceneId, Stage};

pub use show_speaker::SPEAKER_BARS;

/// Coarse progress of the show, published to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowPhase {
    /// Quiz on screen, waiting for the right answer
    Idle,
    Blackout,
    Invitation,
    Cascade,
    Looping,
    Cancelled,
}

/// What a quiz selection did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Unknown index, disabled choice, or a reveal already underway
    Ignored,
    Wrong,
    Correct,
}

/// Owns the stage and every chain the reveal spawns.
///
/// Cloning is cheap and every clone drives the same show.
#[derive(Debug, Clone)]
pub struct Show {
    stage: Arc<Stage>,
    config: Arc<ShowConfig>,
    soundtrack: Soundtrack,
    tasks: TaskGroup,
    flash: Arc<Mutex<Option<FlashLoop>>>,
    rng: Arc<Mutex<StdRng>>,
    phase: Arc<watch::Sender<ShowPhase>>,
    triggered: Arc<AtomicBool>,
}

impl Show {
    pub fn new(stage: Stage, config: ShowConfig, soundtrack: Soundtrack) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (phase, _) = watch::channel(ShowPhase::Idle);

        Self {
            stage: Arc::new(stage),
            config: Arc::new(config),
            soundtrack,
            tasks: TaskGroup::new(),
            flash: Arc::new(Mutex::new(None)),
            rng: Arc::new(Mutex::new(rng)),
            phase: Arc::new(phase),
            triggered: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn config(&self) -> &ShowConfig {
        &self.config
    }

    pub fn soundtrack(&self) -> &Soundtrack {
        &self.soundtrack
    }

    pub fn phase(&self) -> ShowPhase {
        *self.phase.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ShowPhase> {
        self.phase.subscribe()
    }

    /// True once the correct answer has been picked
    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Tear down every pending chain and the flash loop
    pub fn cancel(&self) {
        log_info!("cancelling show with {} chains still running", self.tasks.active());
        self.tasks.cancel();
        if let Some(flash) = self.flash_slot().take() {
            flash.abort();
        }
        self.set_phase(ShowPhase::Cancelled);
    }

    pub(crate) fn element(&self, id: SceneId) -> Option<&Element> {
        self.stage.element(id)
    }

    pub(crate) fn set_phase(&self, phase: ShowPhase) {
        let previous = self.phase.send_replace(phase);
        if previous != phase {
            log_info!("show phase {:?} -> {:?}", previous, phase);
        }
    }

    fn flash_slot(&self) -> std::sync::MutexGuard<'_, Option<FlashLoop>> {
        self.flash.lock().unwrap_or_else(|e| e.into_inner())
    }
}
