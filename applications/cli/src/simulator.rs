//! Simulated media backend
//!
//! Stands in for an audio device: it keeps a virtual playhead and, when
//! ticked, reports what a real media element would (metadata, progress, end
//! of track). Nothing is decoded or rendered.

use std::cell::Cell;
use tune_playback::{LoadToken, MediaBackend, MediaEvent, MediaEventKind};

/// Media backend that plays silence on a virtual clock
///
/// Commands arrive through [`MediaBackend`] while the engine owns it;
/// [`tick`](Self::tick) only needs a shared reference, so the driver can
/// advance the clock through `MusicPlayer::backend`.
#[derive(Debug, Default)]
pub struct SimulatedBackend {
    token: Cell<Option<LoadToken>>,
    position: Cell<f64>,
    playing: Cell<bool>,
    metadata_sent: Cell<bool>,
    gain: Cell<f32>,
}

impl SimulatedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the virtual clock by `seconds`
    ///
    /// `duration` is the bound track's length. Returns the notifications a
    /// media element would have fired during that time.
    pub fn tick(&self, seconds: f64, duration: f64) -> Vec<MediaEvent> {
        let Some(token) = self.token.get() else {
            return Vec::new();
        };
        if !self.playing.get() {
            return Vec::new();
        }

        let mut events = Vec::new();
        if !self.metadata_sent.get() {
            self.metadata_sent.set(true);
            events.push(MediaEvent::new(token, MediaEventKind::MetadataLoaded(duration)));
        }

        let position = (self.position.get() + seconds).min(duration);
        self.position.set(position);

        if position >= duration {
            self.playing.set(false);
            events.push(MediaEvent::new(token, MediaEventKind::Ended));
        } else {
            events.push(MediaEvent::new(token, MediaEventKind::TimeUpdate(position)));
        }

        events
    }

    /// Current output gain
    pub fn gain(&self) -> f32 {
        self.gain.get()
    }

    pub fn is_playing(&self) -> bool {
        self.playing.get()
    }
}

impl MediaBackend for SimulatedBackend {
    fn bind(&mut self, token: LoadToken, _locator: &str) -> tune_playback::Result<()> {
        self.token.set(Some(token));
        self.position.set(0.0);
        self.playing.set(false);
        self.metadata_sent.set(false);
        Ok(())
    }

    fn start(&mut self) -> tune_playback::Result<()> {
        self.playing.set(true);
        Ok(())
    }

    fn halt(&mut self) {
        self.playing.set(false);
    }

    fn set_position(&mut self, seconds: f64) {
        self.position.set(seconds);
    }

    fn set_gain(&mut self, gain: f32) {
        self.gain.set(gain);
    }
}
