//! Tune Stream - Playback Core
//!
//! Client-side playback for Tune Stream.
//!
//! This crate provides:
//! - A playback engine owning the single media handle (load, play, pause,
//!   seek, volume, mute)
//! - A circular play queue and the controller that advances it
//! - A like/unlike state machine that tolerates out-of-order responses
//! - The `MusicPlayer` facade composing all of the above
//!
//! # Architecture
//!
//! `tune-playback` does not render audio and does not speak HTTP:
//! - Media output is a [`MediaBackend`] (browser element, native stream, simulator)
//! - Remote calls go through [`tune_core::MusicGateway`]
//!
//! Notifications from the backend are tagged with the [`LoadToken`] of the
//! load they belong to; anything tagged with an older token is dropped.
//!
//! # Example: Engine
//!
//! ```rust
//! use tune_playback::{MediaBackend, MediaEvent, MediaEventKind, PlaybackEngine, TransportStatus};
//! use tune_playback::{LoadToken, Result};
//! use tune_core::{Track, TrackId};
//!
//! struct Silent;
//!
//! impl MediaBackend for Silent {
//!     fn bind(&mut self, _token: LoadToken, _locator: &str) -> Result<()> {
//!         Ok(())
//!     }
//!     fn start(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!     fn halt(&mut self) {}
//!     fn set_position(&mut self, _seconds: f64) {}
//!     fn set_gain(&mut self, _gain: f32) {}
//! }
//!
//! let mut engine = PlaybackEngine::new(Silent, 75);
//! let track = Track::new(TrackId::new(1), "Intro", "Artist", 180, "/uploads/intro.mp3");
//!
//! let token = engine.load(Some(&track)).unwrap();
//! engine.play();
//! assert_eq!(engine.status(), TransportStatus::Playing);
//!
//! engine.handle_media_event(MediaEvent::new(token, MediaEventKind::MetadataLoaded(181.5)));
//! engine.seek(500.0);
//! assert_eq!(engine.elapsed(), 181.5);
//! ```

mod backend;
mod controller;
mod engine;
mod error;
pub mod events;
mod likes;
mod player;
mod queue;
pub mod types;
mod volume;

// Public exports
pub use backend::{MediaBackend, MediaEvent, MediaEventKind};
pub use controller::{ControllerState, GatewayPlayReporter, PlayReporter, QueueController};
pub use engine::PlaybackEngine;
pub use error::{PlaybackError, Result};
pub use events::{EngineEvent, PlayerNotice};
pub use likes::{LikeAction, LikeRequest, LikeSettlement, LikeStateMachine};
pub use player::MusicPlayer;
pub use queue::Queue;
pub use types::{LoadToken, PlayerConfig, TransportStatus};
pub use volume::Volume;
