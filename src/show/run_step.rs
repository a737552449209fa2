use super::Show;
use crate::config::Step;
use crate::effects::{autofit, neon_blink, sleep_ms, type_lines};
use crate::stage::tag;
use crate::{log_debug, log_warn};

impl Show {
    /// Run one cascade step to completion. Steps aimed at an element the
    /// stage does not have do nothing, but a wordmark still holds the cue
    /// for its blink and pause.
    pub(crate) async fn run_step(&self, step: &Step) {
        if let Some(target) = step.target() {
            if self.element(target).is_none() {
                log_debug!("no element {} for {}", target.as_str(), step.name());
                if !matches!(step, Step::Wordmark { .. }) {
                    return;
                }
            }
        }

        match serde_json::to_string(step) {
            Ok(json) => log_debug!("step {}", json),
            Err(e) => log_warn!("could not serialize step {}: {}", step.name(), e),
        }

        match step {
            Step::Blink { target, timing } => {
                neon_blink(self.element(*target), *timing).await;
            }
            Step::SetText { target, text } => {
                if let Some(el) = self.element(*target) {
                    el.set_text(text.clone());
                }
            }
            Step::AddTag { target, tag } => {
                if let Some(el) = self.element(*target) {
                    el.add_tag(tag);
                }
            }
            Step::RemoveTag { target, tag } => {
                if let Some(el) = self.element(*target) {
                    el.remove_tag(tag);
                }
            }
            Step::SetHidden { target, hidden } => {
                if let Some(el) = self.element(*target) {
                    el.set_hidden(*hidden);
                }
            }
            Step::Wait { ms } => sleep_ms(*ms).await,
            Step::Autofit { target } => {
                autofit(self.element(*target), self.stage.measure(), self.config.autofit);
            }
            Step::Wordmark { target, text, timing, pause_ms } => {
                let el = self.element(*target);
                if let Some(el) = el {
                    if let Some(text) = text {
                        el.set_text(text.clone());
                    }
                    el.add_tag(tag::SHOW);
                    el.set_hidden(false);
                }
                if el.is_some() {
                    autofit(el, self.stage.measure(), self.config.autofit);
                    neon_blink(el, *timing).await;
                } else {
                    sleep_ms(timing.total_ms()).await;
                }
                sleep_ms(*pause_ms).await;
            }
            Step::TypeLines { target, lines, cps } => {
                type_lines(self.element(*target), lines, *cps).await;
            }
            Step::FlashLoop { target, texts } => {
                self.start_flash_loop(*target, texts.clone());
            }
            Step::StopMusic { fade_ms } => {
                let fade_ms = fade_ms.unwrap_or(self.config.audio.fade_out_ms);
                self.soundtrack.stop(fade_ms).await;
            }
        }
    }
}
