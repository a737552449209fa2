use super::Show;
use crate::effects::sleep_ms;
use crate::stage::{tag, SceneId};

/// Speaker glyph frames, quiet to loud
pub const SPEAKER_BARS: [&str; 3] = ["◁", "◁ )", "◁ ))"];

const BAR_FRAMES_MS: [u64; 3] = [220, 220, 260];
const BAR_ROUNDS: usize = 2;

impl Show {
    /// Flash the "sound on" overlay with an animated speaker for
    /// `speaker_ms`, then hide it again. Runs detached.
    pub(crate) fn show_speaker(&self) {
        let overlay = self.element(SceneId::SoundOverlay).cloned();
        let speaker = self.element(SceneId::Speaker).cloned();
        let speaker_ms = self.config.timing.speaker_ms;

        if let Some(overlay) = &overlay {
            overlay.add_tag(tag::SHOW);
            overlay.set_hidden(false);
            overlay.set_opacity(1.0);
        }

        // `play` restarts from scratch every time
        if let Some(speaker) = &speaker {
            speaker.remove_tag(tag::PLAY);
            speaker.add_tag(tag::PLAY);
        }

        self.tasks.spawn(async move {
            let mut elapsed = 0u64;
            'bars: for _ in 0..BAR_ROUNDS {
                for (bars, frame_ms) in SPEAKER_BARS.iter().zip(BAR_FRAMES_MS) {
                    if elapsed >= speaker_ms {
                        break 'bars;
                    }
                    if let Some(speaker) = &speaker {
                        speaker.set_text(*bars);
                    }
                    let frame_ms = frame_ms.min(speaker_ms - elapsed);
                    sleep_ms(frame_ms).await;
                    elapsed += frame_ms;
                }
            }
            sleep_ms(speaker_ms.saturating_sub(elapsed)).await;

            if let Some(overlay) = &overlay {
                overlay.remove_tag(tag::SHOW);
                overlay.set_hidden(true);
                overlay.set_opacity(0.0);
            }
            if let Some(speaker) = &speaker {
                speaker.remove_tag(tag::PLAY);
                speaker.set_text(SPEAKER_BARS[0]);
            }
        });
    }
}
