// src/util/audio/mod.rs
mod memory;
mod rodio_channel;

use std::time::Instant;

use crate::error::Result;

pub use memory::MemoryChannel;
pub use rodio_channel::RodioChannel;

/// A single playable/pausable audio source with volume, loop and mute.
///
/// Methods take `&self`: a channel is shared between the music controller
/// and the fades it spawns, so implementations keep their state behind a
/// lock.
pub trait MediaChannel: Send + Sync + std::fmt::Debug {
    /// Start (or resume) playback. `Err` means the host refused.
    fn play(&self) -> Result<()>;
    fn pause(&self);
    fn is_paused(&self) -> bool;
    fn set_position_ms(&self, position_ms: u64);
    fn position_ms(&self) -> u64;
    /// Volume is clamped to [0, 1].
    fn set_volume(&self, volume: f32);
    fn volume(&self) -> f32;
    fn set_looping(&self, looping: bool);
    fn is_looping(&self) -> bool;
    fn set_muted(&self, muted: bool);
    fn is_muted(&self) -> bool;
}

/// Transport state shared by the channel implementations
#[derive(Debug, Clone)]
pub struct ChannelState {
    pub paused: bool,
    pub looping: bool,
    pub muted: bool,
    pub volume: f32,
    position_ms: u64,
    playing_since: Option<Instant>,
}

impl Default for ChannelState {
    fn default() -> Self {
        Self {
            paused: true,
            looping: false,
            muted: false,
            volume: 1.0,
            position_ms: 0,
            playing_since: None,
        }
    }
}

impl ChannelState {
    pub fn start(&mut self) {
        if self.paused {
            self.paused = false;
            self.playing_since = Some(Instant::now());
        }
    }

    pub fn stop(&mut self) {
        if let Some(since) = self.playing_since.take() {
            self.position_ms += since.elapsed().as_millis() as u64;
        }
        self.paused = true;
    }

    pub fn seek(&mut self, position_ms: u64) {
        self.position_ms = position_ms;
        if self.playing_since.is_some() {
            self.playing_since = Some(Instant::now());
        }
    }

    pub fn position_ms(&self) -> u64 {
        let running = self
            .playing_since
            .map(|since| since.elapsed().as_millis() as u64)
            .unwrap_or(0);
        self.position_ms + running
    }

    /// Volume actually sent to the output, mute applied
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }
}
