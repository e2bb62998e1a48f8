//! Error types for the Tune Stream server client.

use thiserror::Error;
use tune_core::{TrackId, TuneError};

/// Errors that can occur when talking to a Tune Stream server.
#[derive(Error, Debug)]
pub enum ServerClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Authentication required but no token available, or the token was rejected
    #[error("Authentication required")]
    AuthRequired,

    /// Server refused access to another user's resources
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Track is already liked by the current user
    #[error("Track {0} already liked")]
    AlreadyLiked(TrackId),

    /// Requested entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Server rejected the request body or parameters
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

/// Result type for server client operations.
pub type Result<T> = std::result::Result<T, ServerClientError>;

impl From<ServerClientError> for TuneError {
    fn from(err: ServerClientError) -> Self {
        match err {
            ServerClientError::AlreadyLiked(id) => TuneError::LikeConflict(id),
            ServerClientError::AuthRequired | ServerClientError::AccessDenied(_) => {
                TuneError::AuthRequired
            }
            ServerClientError::NotFound { entity, id } => TuneError::not_found(entity, id),
            ServerClientError::BadRequest(msg) | ServerClientError::InvalidUrl(msg) => {
                TuneError::InvalidInput(msg)
            }
            ServerClientError::Request(_)
            | ServerClientError::ServerError { .. }
            | ServerClientError::ParseError(_)
            | ServerClientError::ServerUnreachable(_) => TuneError::Network(err.to_string()),
        }
    }
}
