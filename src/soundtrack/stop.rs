use super::Soundtrack;
use crate::effects::fade_out;

impl Soundtrack {
    /// Fade out over `fade_ms` (0 = cut), then pause and rewind.
    pub async fn stop(&self, fade_ms: u64) {
        let Some(channel) = self.channel() else { return };

        if fade_ms > 0 {
            fade_out(channel, fade_ms).await;
        }
        channel.pause();
        channel.set_position_ms(0);
    }
}
