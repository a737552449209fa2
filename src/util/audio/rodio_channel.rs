use rodio::{Decoder, OutputStream, Sink, Source};
use std::io::Cursor;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use super::{ChannelState, MediaChannel};
use crate::error::{RevealError, Result};
use crate::{log_debug, log_error};

enum AudioCommand {
    Play { looping: bool },
    Pause,
    Rewind { offset_ms: u64 },
    Volume(f32),
}

/// Speaker output through rodio.
///
/// The output stream is not `Send`, so it lives on its own thread and the
/// channel talks to it with commands. Transport state is mirrored locally
/// so reads never wait on the audio thread.
#[derive(Debug)]
pub struct RodioChannel {
    path: String,
    state: Arc<Mutex<ChannelState>>,
    commands: Mutex<Sender<AudioCommand>>,
}

impl RodioChannel {
    /// Open the default output device and load the track at `path`.
    pub fn open(path: &str) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        // Fail early on undecodable files instead of on first play
        Decoder::new(Cursor::new(bytes.clone()))
            .map_err(|e| RevealError::AudioError(format!("{}: {}", path, e)))?;

        let (tx, rx) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);
        let thread_path = path.to_string();

        thread::spawn(move || {
            // Create OutputStream inside the thread to avoid Send issues on macOS
            let (_stream, handle) = match OutputStream::try_default() {
                Ok(v) => v,
                Err(e) => {
                    let _ = ready_tx.send(Err(format!("Failed to create audio stream: {}", e)));
                    return;
                }
            };

            let sink = match Sink::try_new(&handle) {
                Ok(s) => s,
                Err(e) => {
                    let _ = ready_tx.send(Err(format!("Failed to create sink: {}", e)));
                    return;
                }
            };
            sink.pause();

            let _ = ready_tx.send(Ok(()));
            run_audio_thread(&thread_path, bytes, &handle, sink, rx);
        });

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                path: path.to_string(),
                state: Arc::new(Mutex::new(ChannelState::default())),
                commands: Mutex::new(tx),
            }),
            Ok(Err(e)) => Err(RevealError::AudioError(e)),
            Err(_) => Err(RevealError::AudioError("audio thread exited".to_string())),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn state(&self) -> MutexGuard<'_, ChannelState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn send(&self, command: AudioCommand) -> bool {
        self.commands
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .send(command)
            .is_ok()
    }

    fn push_volume(&self) {
        let volume = self.state().effective_volume();
        self.send(AudioCommand::Volume(volume));
    }
}

fn run_audio_thread(
    path: &str,
    bytes: Vec<u8>,
    handle: &rodio::OutputStreamHandle,
    mut sink: Sink,
    commands: Receiver<AudioCommand>,
) {
    let mut offset_ms = 0u64;
    let mut volume = 1.0f32;

    while let Ok(command) = commands.recv() {
        match command {
            AudioCommand::Play { looping } => {
                if sink.empty() {
                    let source = match Decoder::new(Cursor::new(bytes.clone())) {
                        Ok(s) => s.skip_duration(Duration::from_millis(offset_ms)),
                        Err(e) => {
                            log_error!("Failed to decode audio file {}: {}", path, e);
                            continue;
                        }
                    };
                    if looping {
                        sink.append(source.repeat_infinite());
                    } else {
                        sink.append(source);
                    }
                }
                sink.play();
            }
            AudioCommand::Pause => sink.pause(),
            AudioCommand::Rewind { offset_ms: offset } => {
                // Fresh sink; the source is appended again on the next play
                sink.stop();
                match Sink::try_new(handle) {
                    Ok(fresh) => {
                        fresh.pause();
                        fresh.set_volume(volume);
                        sink = fresh;
                    }
                    Err(e) => {
                        log_error!("Failed to recreate sink: {}", e);
                        return;
                    }
                }
                offset_ms = offset;
            }
            AudioCommand::Volume(v) => {
                volume = v;
                sink.set_volume(v);
            }
        }
    }

    log_debug!("audio thread for {} exiting", path);
}

impl MediaChannel for RodioChannel {
    fn play(&self) -> Result<()> {
        let looping = self.state().looping;
        self.push_volume();
        if !self.send(AudioCommand::Play { looping }) {
            return Err(RevealError::PlaybackRejected(format!(
                "audio thread for {} is gone",
                self.path
            )));
        }
        self.state().start();
        Ok(())
    }

    fn pause(&self) {
        self.send(AudioCommand::Pause);
        self.state().stop();
    }

    fn is_paused(&self) -> bool {
        self.state().paused
    }

    fn set_position_ms(&self, position_ms: u64) {
        let was_playing = !self.state().paused;
        self.send(AudioCommand::Rewind { offset_ms: position_ms });
        self.state().seek(position_ms);
        if was_playing {
            let looping = self.state().looping;
            self.send(AudioCommand::Play { looping });
        }
    }

    fn position_ms(&self) -> u64 {
        self.state().position_ms()
    }

    fn set_volume(&self, volume: f32) {
        self.state().volume = volume.clamp(0.0, 1.0);
        self.push_volume();
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
        self.push_volume();
    }

    fn is_muted(&self) -> bool {
        self.state().muted
    }
}
