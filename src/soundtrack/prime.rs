use std::sync::atomic::Ordering;

use super::Soundtrack;
use crate::log_debug;

impl Soundtrack {
    /// Unlock later playback from inside a user gesture.
    ///
    /// Starts muted playback, then immediately pauses, rewinds and unmutes,
    /// leaving the channel silent but allowed to start without a gesture.
    /// Must run synchronously in the gesture handler. Only the first call
    /// does anything.
    pub fn prime(&self) {
        let Some(channel) = self.channel() else { return };
        if self.primed.swap(true, Ordering::SeqCst) {
            return;
        }

        channel.set_looping(true);
        channel.set_muted(true);
        channel.set_position_ms(0);

        match channel.play() {
            Ok(()) => {
                channel.pause();
                channel.set_position_ms(0);
                channel.set_muted(false);
            }
            Err(e) => {
                // A later play() still gets its own chance
                log_debug!("priming playback refused: {}", e);
                channel.set_muted(false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::soundtrack::Soundtrack;
    use crate::util::audio::{MediaChannel, MemoryChannel};

    #[test]
    fn test_prime_leaves_channel_paused_rewound_unmuted() {
        let channel = MemoryChannel::new();
        let soundtrack = Soundtrack::new(Arc::new(channel.clone()));

        soundtrack.prime();

        assert!(soundtrack.is_primed());
        assert_eq!(channel.play_calls(), 1);
        assert!(channel.is_paused());
        assert!(!channel.is_muted());
        assert!(channel.is_looping());
        assert_eq!(channel.position_ms(), 0);
    }

    #[test]
    fn test_prime_runs_once() {
        let channel = MemoryChannel::new();
        let soundtrack = Soundtrack::new(Arc::new(channel.clone()));
        soundtrack.prime();
        soundtrack.prime();
        assert_eq!(channel.play_calls(), 1);
    }

    #[test]
    fn test_prime_swallows_rejection() {
        let channel = MemoryChannel::rejecting();
        let soundtrack = Soundtrack::new(Arc::new(channel.clone()));
        soundtrack.prime();
        assert!(soundtrack.is_primed());
        assert!(!channel.is_muted());
        assert!(channel.is_paused());
    }

    #[test]
    fn test_prime_without_channel_is_a_no_op() {
        let soundtrack = Soundtrack::silent();
        soundtrack.prime();
        assert!(!soundtrack.is_primed());
    }
}
