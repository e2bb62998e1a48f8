//! Platform-agnostic media backend trait
//!
//! Abstracts the single audio-rendering handle (a browser media element, a
//! native output stream, a simulator) behind the operations the engine needs.

use crate::error::Result;
use crate::types::LoadToken;

/// Audio-rendering handle owned by the [`PlaybackEngine`](crate::PlaybackEngine)
///
/// Calls are commands; outcomes that arrive later (progress, metadata, end of
/// resource, late failures) are reported back by the host through
/// [`PlaybackEngine::handle_media_event`](crate::PlaybackEngine::handle_media_event),
/// tagged with the token passed to [`bind`](MediaBackend::bind).
#[cfg_attr(test, mockall::automock)]
pub trait MediaBackend: Send {
    /// Point the handle at a new media resource, replacing the previous one
    ///
    /// Must not start playback.
    fn bind(&mut self, token: LoadToken, locator: &str) -> Result<()>;

    /// Start or resume rendering
    ///
    /// # Returns
    /// * `Err(_)` - resource unavailable, unsupported, or playback blocked
    fn start(&mut self) -> Result<()>;

    /// Pause rendering, keeping the position
    fn halt(&mut self);

    /// Move the playhead (seconds from start)
    fn set_position(&mut self, seconds: f64);

    /// Output gain in `[0.0, 1.0]`
    fn set_gain(&mut self, gain: f32);
}

/// Notification from the media backend
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEvent {
    /// Token of the load this notification originates from
    pub token: LoadToken,
    pub kind: MediaEventKind,
}

/// What happened on the media handle
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEventKind {
    /// Playhead moved (seconds)
    TimeUpdate(f64),

    /// Total duration became known (seconds)
    MetadataLoaded(f64),

    /// Playback reached the end of the resource
    Ended,

    /// Resource failed after binding (network, decode, ...)
    Error(String),
}

impl MediaEvent {
    pub fn new(token: LoadToken, kind: MediaEventKind) -> Self {
        Self { token, kind }
    }
}
