//! Main Tune Stream server client.

use crate::auth::AuthClient;
use crate::error::{Result, ServerClientError};
use crate::likes::LikesClient;
use crate::playlists::PlaylistsClient;
use crate::songs::SongsClient;
use crate::types::ServerConfig;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;

/// Main client for interacting with a Tune Stream server.
///
/// Holds the connection pool and the (mutable) credentials. Each call site
/// takes a [`ClientHandle`] snapshot so that sub-clients can borrow the URL
/// and token without holding the lock across requests.
///
/// # Example
///
/// ```ignore
/// use tune_server_client::{ServerConfig, TuneServerClient};
///
/// let client = TuneServerClient::new(ServerConfig::new("https://music.example.com"))?;
/// let handle = client.handle().await;
/// let suggested = handle.songs().suggested(20).await?;
/// ```
#[derive(Clone)]
pub struct TuneServerClient {
    http: Client,
    config: Arc<RwLock<ServerConfig>>,
}

impl TuneServerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let url = normalize_url(&config.url)?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("TuneStream/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(ServerConfig { url, ..config })),
        })
    }

    /// Get the server URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client has an access token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.access_token.is_some()
    }

    /// Set the access token directly (e.g., from stored credentials).
    pub async fn set_token(&self, access_token: impl Into<String>) {
        self.config.write().await.access_token = Some(access_token.into());
    }

    /// Clear the stored token (logout).
    pub async fn logout(&self) {
        self.config.write().await.access_token = None;
        info!("Logged out");
    }

    /// Snapshot the current URL and token for a batch of requests.
    pub async fn handle(&self) -> ClientHandle {
        let config = self.config.read().await;
        ClientHandle {
            http: self.http.clone(),
            url: config.url.clone(),
            access_token: config.access_token.clone(),
        }
    }

    /// Snapshot without credentials, for requests made on behalf of an
    /// anonymous identity.
    pub async fn anonymous_handle(&self) -> ClientHandle {
        ClientHandle {
            http: self.http.clone(),
            url: self.url().await,
            access_token: None,
        }
    }
}

/// Validate the scheme and strip trailing slashes.
fn normalize_url(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(ServerClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let trimmed = raw.trim_end_matches('/');
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(ServerClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    url::Url::parse(trimmed).map_err(|e| ServerClientError::InvalidUrl(e.to_string()))?;

    Ok(trimmed.to_string())
}

/// Snapshot of the client's connection state.
///
/// Returned by [`TuneServerClient::handle`]; hands out borrowed sub-clients.
pub struct ClientHandle {
    http: Client,
    url: String,
    access_token: Option<String>,
}

impl ClientHandle {
    /// Whether this snapshot carries a token.
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Song catalogue operations (anonymous access allowed).
    pub fn songs(&self) -> SongsClient<'_> {
        SongsClient::new(&self.http, &self.url, self.access_token.as_deref())
    }

    /// Playlist operations. Listing and creating require a token.
    pub fn playlists(&self) -> PlaylistsClient<'_> {
        PlaylistsClient::new(&self.http, &self.url, self.access_token.as_deref())
    }

    /// Like operations.
    ///
    /// Returns an error if not authenticated.
    pub fn likes(&self) -> Result<LikesClient<'_>> {
        let token = self
            .access_token
            .as_deref()
            .ok_or(ServerClientError::AuthRequired)?;
        Ok(LikesClient::new(&self.http, &self.url, token))
    }

    /// Identity resolution.
    ///
    /// Returns an error if not authenticated.
    pub fn auth(&self) -> Result<AuthClient<'_>> {
        let token = self
            .access_token
            .as_deref()
            .ok_or(ServerClientError::AuthRequired)?;
        Ok(AuthClient::new(&self.http, &self.url, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        // Valid URLs
        assert!(TuneServerClient::new(ServerConfig::new("https://example.com")).is_ok());
        assert!(TuneServerClient::new(ServerConfig::new("http://localhost:8080")).is_ok());

        // Invalid URLs
        assert!(TuneServerClient::new(ServerConfig::new("")).is_err());
        assert!(TuneServerClient::new(ServerConfig::new("not-a-url")).is_err());
        assert!(TuneServerClient::new(ServerConfig::new("ftp://example.com")).is_err());
    }

    #[test]
    fn test_url_normalization() {
        assert_eq!(
            normalize_url("https://example.com///").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn handle_without_token_refuses_likes() {
        let client = TuneServerClient::new(ServerConfig::new("https://example.com")).unwrap();
        let handle = tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(client.handle());

        assert!(!handle.is_authenticated());
        assert!(matches!(handle.likes(), Err(ServerClientError::AuthRequired)));
        assert!(matches!(handle.auth(), Err(ServerClientError::AuthRequired)));
    }
}
