//! Error types for playback management

use thiserror::Error;

/// Playback errors
///
/// Raised by a [`MediaBackend`](crate::MediaBackend). The engine never lets
/// these cross its boundary: they become a stopped transport plus a
/// `PlaybackFailed` event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Media resource could not be fetched or opened
    #[error("Media unavailable: {0}")]
    Unavailable(String),

    /// Media format cannot be rendered
    #[error("Unsupported media: {0}")]
    Unsupported(String),

    /// Playback refused by the host (e.g. autoplay needs a user gesture)
    #[error("Playback blocked: {0}")]
    Blocked(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
