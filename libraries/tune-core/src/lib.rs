//! Tune Stream Core
//!
//! Platform-agnostic core types, traits, and error handling for Tune Stream.
//!
//! This crate provides the foundational building blocks shared by the
//! playback core, the HTTP client, and the `tune` binary.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist`, `PlaylistEntry`, `LikeRecord`, `User`
//! - **Identity**: authenticated vs. anonymous actor
//! - **Gateway Trait**: `MusicGateway`, the remote operations the player consumes
//! - **Error Handling**: Unified `TuneError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use tune_core::types::{Identity, Track, TrackId, UserId};
//!
//! let track = Track::new(TrackId::new(1), "Intro", "Artist", 180, "/uploads/intro.mp3");
//! assert_eq!(track.play_count(), 0);
//!
//! let identity = Identity::authenticated(UserId::new("user-1"));
//! assert!(identity.is_authenticated());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Result, TuneError};
pub use traits::MusicGateway;

pub use types::{
    Identity, LikeRecord, NewPlaylist, Playlist, PlaylistEntry, PlaylistId, Track, TrackId, User,
    UserId,
};
