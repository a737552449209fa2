use std::sync::{Arc, Mutex, MutexGuard};

use super::{ChannelState, MediaChannel};
use crate::error::{RevealError, Result};

/// Media channel with no output device.
///
/// Used when no audio device or asset is available, and by tests. A
/// rejecting channel refuses every `play()`, the way a browser blocks
/// playback that was never unlocked by a gesture.
#[derive(Debug, Clone, Default)]
pub struct MemoryChannel {
    state: Arc<Mutex<ChannelState>>,
    volume_history: Arc<Mutex<Vec<f32>>>,
    play_calls: Arc<Mutex<usize>>,
    rejecting: bool,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        Self {
            rejecting: true,
            ..Self::default()
        }
    }

    /// Every volume written so far, in order
    pub fn volume_history(&self) -> Vec<f32> {
        self.volume_history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn clear_history(&self) {
        self.volume_history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    pub fn play_calls(&self) -> usize {
        *self.play_calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn state(&self) -> MutexGuard<'_, ChannelState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl MediaChannel for MemoryChannel {
    fn play(&self) -> Result<()> {
        *self.play_calls.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        if self.rejecting {
            return Err(RevealError::PlaybackRejected(
                "playback not allowed".to_string(),
            ));
        }
        self.state().start();
        Ok(())
    }

    fn pause(&self) {
        self.state().stop();
    }

    fn is_paused(&self) -> bool {
        self.state().paused
    }

    fn set_position_ms(&self, position_ms: u64) {
        self.state().seek(position_ms);
    }

    fn position_ms(&self) -> u64 {
        self.state().position_ms()
    }

    fn set_volume(&self, volume: f32) {
        let v = volume.clamp(0.0, 1.0);
        self.state().volume = v;
        self.volume_history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(v);
    }

    fn volume(&self) -> f32 {
        self.state().volume
    }

    fn set_looping(&self, looping: bool) {
        self.state().looping = looping;
    }

    fn is_looping(&self) -> bool {
        self.state().looping
    }

    fn set_muted(&self, muted: bool) {
        self.state().muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.state().muted
    }
}
