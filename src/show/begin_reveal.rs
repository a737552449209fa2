use std::sync::atomic::Ordering;
use tokio::time::Instant;

use super::{Show, ShowPhase};
use crate::effects::{fade_opacity, sleep_ms, type_line};
use crate::log_info;
use crate::soundtrack::PlayOptions;
use crate::stage::{tag, SceneId};

/// Typed when the invitation element carries no text of its own
pub const INVITATION_FALLBACK: &str = "We invite you to celebrate the last day of class";

impl Show {
    /// Start the reveal for the correct answer at `index`.
    ///
    /// Everything up to the blackout happens before this returns, priming
    /// included, so the audio unlock stays inside the user gesture. The
    /// rest runs as a spawned chain. Returns false if already triggered.
    pub(crate) fn begin_reveal(&self, index: usize) -> bool {
        if self.triggered.swap(true, Ordering::SeqCst) {
            return false;
        }
        log_info!("correct answer picked at index {}", index);

        let option_fade_ms = self.config.timing.option_fade_ms;
        for (i, choice) in self.stage.choices().iter().enumerate() {
            choice.element.set_disabled(true);
            if i == index {
                choice.element.remove_tags(&[tag::WRONG, tag::SHAKE]);
                choice.element.add_tag(tag::CORRECT);
            } else {
                let el = choice.element.clone();
                self.tasks.spawn(async move {
                    fade_opacity(&el, 0.0, option_fade_ms).await;
                });
            }
        }

        self.soundtrack.prime();

        if let Some(blackout) = self.element(SceneId::Blackout) {
            blackout.add_tag(tag::VISIBLE);
        }
        self.set_phase(ShowPhase::Blackout);

        let show = self.clone();
        self.tasks.spawn(async move { show.reveal_chain().await });
        true
    }

    async fn reveal_chain(self) {
        let timing = self.config.timing.clone();

        sleep_ms(timing.quiz_hide_delay_ms).await;
        if let Some(quiz) = self.element(SceneId::Quiz) {
            quiz.add_tag(tag::HIDDEN);
            quiz.set_hidden(true);
        }

        self.set_phase(ShowPhase::Invitation);
        type_line(self.element(SceneId::IntroLine), INVITATION_FALLBACK, self.config.intro.timing).await;

        self.show_speaker();
        sleep_ms(timing.music_delay_ms).await;

        let soundtrack = self.soundtrack.clone();
        let options = PlayOptions::from(&self.config.audio);
        self.tasks.spawn(async move { soundtrack.play(options).await });

        self.set_phase(ShowPhase::Cascade);
        self.run_cascade(Instant::now());
    }
}
