/// Core error types for Tune Stream
use crate::types::{PlaylistId, TrackId};
use thiserror::Error;

/// Result type alias using `TuneError`
pub type Result<T> = std::result::Result<T, TuneError>;

/// Core error type for Tune Stream
///
/// The gateway taxonomy lives here: every `MusicGateway` implementation
/// reports failures through these variants so the player never depends on a
/// transport-specific error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TuneError {
    /// Any gateway call that failed in transit or on the server
    #[error("Network error: {0}")]
    Network(String),

    /// Attempted like on a track that is already liked
    #[error("Track already liked: {0}")]
    LikeConflict(TrackId),

    /// The operation needs an authenticated identity
    #[error("Authentication required")]
    AuthRequired,

    /// Track not found
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Playlist not found
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl TuneError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether this is a like conflict (benign: the track is already liked)
    pub fn is_like_conflict(&self) -> bool {
        matches!(self, Self::LikeConflict(_))
    }
}

impl From<serde_json::Error> for TuneError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_conflict_is_detected() {
        assert!(TuneError::LikeConflict(TrackId::new(4)).is_like_conflict());
        assert!(!TuneError::network("offline").is_like_conflict());
    }

    #[test]
    fn messages_name_the_entity() {
        let err = TuneError::not_found("Playlist", "12");
        assert_eq!(err.to_string(), "Playlist not found: 12");
        assert_eq!(
            TuneError::LikeConflict(TrackId::new(3)).to_string(),
            "Track already liked: 3"
        );
    }
}
