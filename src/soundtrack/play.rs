use super::{PlayOptions, Soundtrack};
use crate::effects::fade_in;
use crate::log_warn;

impl Soundtrack {
    /// Start the music from `start_at_ms` at zero volume and fade it in.
    ///
    /// A host refusal is logged and swallowed: the show carries on silent
    /// and nothing retries.
    pub async fn play(&self, options: PlayOptions) {
        let Some(channel) = self.channel() else { return };

        channel.set_looping(options.looping);
        channel.set_position_ms(options.start_at_ms);
        channel.set_volume(0.0);

        if let Err(e) = channel.play() {
            log_warn!("background music blocked: {}", e);
            return;
        }

        fade_in(channel, options.volume, options.fade_ms).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use tokio::time::{Duration, Instant};

    use crate::soundtrack::{PlayOptions, Soundtrack};
    use crate::util::audio::{MediaChannel, MemoryChannel};

    #[tokio::test(start_paused = true)]
    async fn test_play_fades_to_target() {
        let channel = MemoryChannel::new();
        let soundtrack = Soundtrack::new(Arc::new(channel.clone()));
        soundtrack.prime();

        let options = PlayOptions { start_at_ms: 0, volume: 0.4, fade_ms: 2000, looping: true };
        soundtrack.play(options).await;

        assert!(!channel.is_paused());
        assert!(channel.is_looping());
        assert_eq!(channel.volume(), 0.4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_play_is_silent() {
        let channel = MemoryChannel::rejecting();
        let soundtrack = Soundtrack::new(Arc::new(channel.clone()));

        let start = Instant::now();
        soundtrack.play(PlayOptions::default()).await;

        assert_eq!(start.elapsed(), Duration::ZERO);
        assert!(channel.is_paused());
        assert_eq!(channel.volume(), 0.0);
        assert_eq!(channel.play_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_silent_soundtrack_returns_at_once() {
        let start = Instant::now();
        Soundtrack::silent().play(PlayOptions::default()).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
