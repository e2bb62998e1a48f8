//! Tune Stream Server Client
//!
//! HTTP client library for the Tune Stream REST API, and the production
//! implementation of [`tune_core::MusicGateway`].
//!
//! # Features
//!
//! - **Songs**: suggested, top tunes, catalogue, single track, play counts
//! - **Likes**: like, unlike, list a user's liked tracks
//! - **Playlists**: list, read contents, create
//! - **Auth**: resolve the user behind the bearer token
//!
//! # Example
//!
//! ```ignore
//! use tune_server_client::{ServerConfig, TuneServerClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::with_token("https://music.example.com", "token");
//!     let client = TuneServerClient::new(config)?;
//!
//!     let handle = client.handle().await;
//!     let top = handle.songs().top(10).await?;
//!     println!("Top track: {:?}", top.first().map(|t| &t.title));
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod gateway;
mod likes;
mod playlists;
mod response;
mod songs;
mod types;

// Re-export main types
pub use client::{ClientHandle, TuneServerClient};
pub use error::{Result, ServerClientError};
pub use types::{ServerConfig, DEFAULT_SUGGESTED_LIMIT, DEFAULT_TOP_LIMIT};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use likes::LikesClient;
pub use playlists::PlaylistsClient;
pub use songs::SongsClient;
