use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Show, ShowPhase};
use crate::effects::FlashLoop;
use crate::stage::SceneId;

impl Show {
    /// Start the perpetual flash loop on `target`, replacing any running one.
    ///
    /// The loop gets its own generator split off the show's, so a seeded
    /// show flashes the same way every run.
    pub(crate) fn start_flash_loop(&self, target: SceneId, texts: Vec<String>) {
        if self.tasks.is_cancelled() {
            return;
        }

        let seed: u64 = self.rng.lock().unwrap_or_else(|e| e.into_inner()).gen();
        let flash = FlashLoop::start(
            self.element(target).cloned(),
            texts,
            self.config.flash,
            StdRng::seed_from_u64(seed),
        );

        if let Some(previous) = self.flash_slot().replace(flash) {
            previous.abort();
        }
        self.set_phase(ShowPhase::Looping);
    }

    pub fn is_flash_looping(&self) -> bool {
        self.flash_slot().as_ref().is_some_and(|f| f.is_running())
    }

    /// Flash cycles started by the current loop
    pub fn flash_cycles(&self) -> u64 {
        self.flash_slot().as_ref().map_or(0, |f| f.cycles())
    }

    /// Let the flash loop finish its current cycle and exit
    pub fn stop_flash_loop(&self) {
        if let Some(flash) = self.flash_slot().as_ref() {
            flash.stop();
        }
    }
}
