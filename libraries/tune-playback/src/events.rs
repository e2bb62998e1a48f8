//! Playback Events
//!
//! Event-based communication between the engine, the queue controller and
//! presentation. The engine broadcasts [`EngineEvent`]s to its subscribers;
//! the player facade turns the user-facing outcomes into [`PlayerNotice`]s.

use crate::types::{LoadToken, TransportStatus};
use serde::{Deserialize, Serialize};
use tune_core::TrackId;

/// Events broadcast by the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A new media resource was bound
    Loaded {
        token: LoadToken,
    },

    /// Total duration of the bound resource is known
    MetadataReady {
        token: LoadToken,
        /// Duration in seconds
        duration: f64,
    },

    /// Elapsed time moved (periodic while playing, and on seek)
    Progress {
        token: LoadToken,
        /// Elapsed seconds
        elapsed: f64,
    },

    /// Transport status changed
    StatusChanged {
        status: TransportStatus,
    },

    /// Bound resource played to its end
    Ended {
        token: LoadToken,
    },

    /// Resource could not be loaded or played; transport is stopped
    PlaybackFailed {
        token: LoadToken,
        reason: String,
    },

    /// Volume or mute changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
        /// Whether audio is muted
        is_muted: bool,
    },
}

/// User-visible notification (toast) raised by the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerNotice {
    /// Track added to the liked set
    Liked { track_id: TrackId },

    /// Track removed from the liked set
    Unliked { track_id: TrackId },

    /// Like call failed; liked set unchanged
    LikeFailed { track_id: TrackId, reason: String },

    /// Unlike call failed; liked set unchanged
    UnlikeFailed { track_id: TrackId, reason: String },

    /// Server already had the like; liked set unchanged
    AlreadyLiked { track_id: TrackId },

    /// Current track could not be loaded or played
    PlaybackFailed { track_id: TrackId, reason: String },

    /// Like/unlike attempted without an authenticated identity
    SignInRequired,
}

impl PlayerNotice {
    /// Whether the notice reports a failure (destructive toast)
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::LikeFailed { .. } | Self::UnlikeFailed { .. } | Self::PlaybackFailed { .. }
        )
    }

    /// Short title for display
    pub fn title(&self) -> &'static str {
        match self {
            Self::Liked { .. } => "Song liked!",
            Self::Unliked { .. } => "Song unliked",
            Self::AlreadyLiked { .. } => "Already liked",
            Self::LikeFailed { .. } | Self::UnlikeFailed { .. } | Self::PlaybackFailed { .. } => {
                "Error"
            }
            Self::SignInRequired => "Sign in required",
        }
    }

    /// Longer description for display
    pub fn description(&self) -> String {
        match self {
            Self::Liked { .. } => "Added to your liked songs.".to_string(),
            Self::Unliked { .. } => "Removed from your liked songs.".to_string(),
            Self::AlreadyLiked { .. } => "This song is already in your liked songs.".to_string(),
            Self::LikeFailed { .. } => "Failed to like song. Please try again.".to_string(),
            Self::UnlikeFailed { .. } => "Failed to unlike song. Please try again.".to_string(),
            Self::PlaybackFailed { reason, .. } => format!("Could not play this song: {reason}"),
            Self::SignInRequired => "Sign in to like songs.".to_string(),
        }
    }
}
