//! Background music: gesture priming, fade-in start, fade-out stop.
mod play;
mod prime;
mod stop;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::AudioConfig;
use crate::util::audio::MediaChannel;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayOptions {
    pub start_at_ms: u64,
    pub volume: f32,
    pub fade_ms: u64,
    pub looping: bool,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            start_at_ms: 0,
            volume: 0.6,
            fade_ms: 1200,
            looping: true,
        }
    }
}

impl From<&AudioConfig> for PlayOptions {
    fn from(audio: &AudioConfig) -> Self {
        Self {
            start_at_ms: audio.start_at_ms,
            volume: audio.volume,
            fade_ms: audio.fade_in_ms,
            looping: audio.looping,
        }
    }
}

/// Controller for the single background-music channel.
///
/// Every operation is a silent no-op when there is no channel.
#[derive(Debug, Clone, Default)]
pub struct Soundtrack {
    channel: Option<Arc<dyn MediaChannel>>,
    primed: Arc<AtomicBool>,
}

impl Soundtrack {
    pub fn new(channel: Arc<dyn MediaChannel>) -> Self {
        Self {
            channel: Some(channel),
            primed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A soundtrack with nothing to play
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn channel(&self) -> Option<&dyn MediaChannel> {
        self.channel.as_deref()
    }

    pub fn is_primed(&self) -> bool {
        self.primed.load(Ordering::SeqCst)
    }
}
