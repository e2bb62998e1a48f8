//! Types for Tune Stream API requests and responses.

use serde::Deserialize;
use std::time::Duration;

/// Server default for `/api/songs/suggested`.
pub const DEFAULT_SUGGESTED_LIMIT: usize = 20;

/// Server default for `/api/songs/top-tunes`.
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// Configuration for connecting to a Tune Stream server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL of the server (e.g., "https://music.example.com")
    pub url: String,
    /// Bearer token (if authenticated)
    pub access_token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ServerConfig {
    /// Create a new server config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Create a config with an existing access token.
    pub fn with_token(url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            ..Self::new(url)
        }
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Error body the server attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}
