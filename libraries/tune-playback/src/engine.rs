//! Playback engine
//!
//! Owns the single media handle and the transport state derived from it.
//! Nothing else touches the handle: consumers hold the engine by reference and
//! observe it through [`PlaybackEngine::subscribe`].

use crate::backend::{MediaBackend, MediaEvent, MediaEventKind};
use crate::error::PlaybackError;
use crate::events::EngineEvent;
use crate::types::{LoadToken, TransportStatus};
use crate::volume::Volume;
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{debug, info, warn};
use tune_core::Track;

/// The resource currently bound to the media handle
#[derive(Debug, Clone)]
struct Binding {
    token: LoadToken,
    track: Track,
    /// The backend refused the resource; it can never start
    failed: bool,
}

/// Playback engine
///
/// Transport contract:
/// - `load` binds a resource, resets elapsed time, never auto-plays
/// - `play`/`pause` are idempotent
/// - `seek` clamps into `[0, duration]` and keeps the transport status
/// - `set_volume` clamps into `[0, 100]`
///
/// Backend failures never escape: they stop the transport and are broadcast
/// as [`EngineEvent::PlaybackFailed`]. There is no automatic retry.
pub struct PlaybackEngine<B: MediaBackend> {
    backend: B,
    binding: Option<Binding>,
    status: TransportStatus,
    /// Elapsed seconds in the bound resource
    elapsed: f64,
    /// Known duration in seconds (0 until metadata arrives)
    duration: f64,
    volume: Volume,
    generation: u64,
    subscribers: Vec<Sender<EngineEvent>>,
}

impl<B: MediaBackend> PlaybackEngine<B> {
    /// Create an engine that exclusively owns `backend`
    pub fn new(mut backend: B, initial_volume: u8) -> Self {
        let volume = Volume::new(i32::from(initial_volume));
        backend.set_gain(volume.gain());

        Self {
            backend,
            binding: None,
            status: TransportStatus::Stopped,
            elapsed: 0.0,
            duration: 0.0,
            volume,
            generation: 0,
            subscribers: Vec::new(),
        }
    }

    /// Register an observer for engine events
    ///
    /// Subscriptions live as long as the receiver; dropped receivers are
    /// pruned on the next broadcast.
    pub fn subscribe(&mut self) -> Receiver<EngineEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    // ===== Transport =====

    /// Bind a new media resource
    ///
    /// `None` is a no-op. Otherwise any playing resource is halted, elapsed
    /// time and known duration reset to 0, and the transport is left stopped.
    /// Notifications still in flight for earlier loads are discarded from now on.
    pub fn load(&mut self, track: Option<&Track>) -> Option<LoadToken> {
        let track = track?;

        if self.status == TransportStatus::Playing {
            self.backend.halt();
        }

        self.generation += 1;
        let token = LoadToken {
            generation: self.generation,
            track_id: track.id,
        };

        self.binding = Some(Binding {
            token,
            track: track.clone(),
            failed: false,
        });
        self.elapsed = 0.0;
        self.duration = 0.0;
        self.set_status(TransportStatus::Stopped);

        debug!(track_id = %track.id, generation = token.generation, url = %track.file_url, "Binding media");

        match self.backend.bind(token, &track.file_url) {
            Ok(()) => self.emit(EngineEvent::Loaded { token }),
            Err(e) => {
                if let Some(binding) = &mut self.binding {
                    binding.failed = true;
                }
                self.fail(token, &e);
            }
        }

        Some(token)
    }

    /// Start or resume playback of the bound resource
    ///
    /// No-op without a bound resource, when the resource failed to load, or
    /// when already playing.
    pub fn play(&mut self) {
        let Some(binding) = &self.binding else {
            debug!("play() without a bound track");
            return;
        };
        if binding.failed {
            debug!(track_id = %binding.token.track_id, "play() on a resource that failed to load");
            return;
        }
        let token = binding.token;

        if self.status == TransportStatus::Playing {
            return;
        }

        match self.backend.start() {
            Ok(()) => self.set_status(TransportStatus::Playing),
            Err(e) => self.fail(token, &e),
        }
    }

    /// Pause playback. No-op unless playing.
    pub fn pause(&mut self) {
        if self.status != TransportStatus::Playing {
            return;
        }

        self.backend.halt();
        self.set_status(TransportStatus::Paused);
    }

    /// Release the bound resource
    ///
    /// Halts the backend, forgets the binding so its pending notifications
    /// become stale, resets elapsed time and duration, and stops the
    /// transport.
    pub fn unload(&mut self) {
        let Some(binding) = self.binding.take() else {
            return;
        };

        debug!(track_id = %binding.token.track_id, "Unbinding media");
        self.backend.halt();
        self.elapsed = 0.0;
        self.duration = 0.0;
        self.set_status(TransportStatus::Stopped);
    }

    /// Move the playhead, clamped into `[0, duration]`
    ///
    /// Before metadata arrives the track's declared duration bounds the seek.
    /// Transport status is unchanged.
    pub fn seek(&mut self, seconds: f64) {
        let Some(binding) = &self.binding else {
            return;
        };
        let token = binding.token;

        let upper = if self.duration > 0.0 {
            self.duration
        } else {
            binding.track.duration_secs()
        };
        let target = if seconds.is_nan() {
            0.0
        } else {
            seconds.clamp(0.0, upper)
        };

        self.elapsed = target;
        self.backend.set_position(target);
        self.emit(EngineEvent::Progress {
            token,
            elapsed: target,
        });
    }

    // ===== Volume =====

    /// Set volume; values outside 0-100 are clamped
    pub fn set_volume(&mut self, level: i32) {
        self.volume.set_level(level);
        self.apply_volume();
    }

    /// Mute audio
    pub fn mute(&mut self) {
        self.volume.mute();
        self.apply_volume();
    }

    /// Unmute audio
    pub fn unmute(&mut self) {
        self.volume.unmute();
        self.apply_volume();
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    fn apply_volume(&mut self) {
        self.backend.set_gain(self.volume.gain());
        self.emit(EngineEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    // ===== Backend notifications =====

    /// Feed a notification from the media backend into the engine
    ///
    /// Notifications whose token does not match the current binding are stale
    /// (from a load that has since been replaced) and are dropped.
    ///
    /// # Returns
    /// `true` if the notification was applied
    pub fn handle_media_event(&mut self, event: MediaEvent) -> bool {
        if self.current_token() != Some(event.token) {
            debug!(
                track_id = %event.token.track_id,
                generation = event.token.generation,
                "Discarding stale media notification"
            );
            return false;
        }

        let token = event.token;
        match event.kind {
            MediaEventKind::TimeUpdate(seconds) => {
                if seconds.is_finite() {
                    self.elapsed = seconds.max(0.0);
                    self.emit(EngineEvent::Progress {
                        token,
                        elapsed: self.elapsed,
                    });
                }
            }
            MediaEventKind::MetadataLoaded(seconds) => {
                if seconds.is_finite() && seconds > 0.0 {
                    self.duration = seconds;
                    self.emit(EngineEvent::MetadataReady {
                        token,
                        duration: seconds,
                    });
                }
            }
            MediaEventKind::Ended => {
                info!(track_id = %token.track_id, "Track ended");
                if self.duration > 0.0 {
                    self.elapsed = self.duration;
                }
                self.set_status(TransportStatus::Stopped);
                self.emit(EngineEvent::Ended { token });
            }
            MediaEventKind::Error(reason) => {
                self.fail(token, &PlaybackError::Unavailable(reason));
            }
        }

        true
    }

    // ===== State Queries =====

    /// Current transport status
    pub fn status(&self) -> TransportStatus {
        self.status
    }

    /// Track bound to the media handle
    pub fn current_track(&self) -> Option<&Track> {
        self.binding.as_ref().map(|b| &b.track)
    }

    /// Token of the current binding
    pub fn current_token(&self) -> Option<LoadToken> {
        self.binding.as_ref().map(|b| b.token)
    }

    /// Elapsed seconds in the bound resource
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Known duration in seconds (0 until metadata loads)
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Current volume level (0-100)
    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Borrow the media backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ===== Internal =====

    fn fail(&mut self, token: LoadToken, error: &PlaybackError) {
        warn!(track_id = %token.track_id, error = %error, "Playback failed");
        self.set_status(TransportStatus::Stopped);
        self.emit(EngineEvent::PlaybackFailed {
            token,
            reason: error.to_string(),
        });
    }

    fn set_status(&mut self, status: TransportStatus) {
        if self.status != status {
            self.status = status;
            self.emit(EngineEvent::StatusChanged { status });
        }
    }

    fn emit(&mut self, event: EngineEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
