//! Core types for playback management

use serde::{Deserialize, Serialize};
use tune_core::TrackId;

/// Transport status of the playback engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransportStatus {
    /// Nothing playing (no track, finished, or failed)
    #[default]
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Identity of one `load` on the engine
///
/// Every load gets a fresh generation, so notifications for a previous
/// binding of the *same* track are still told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadToken {
    pub generation: u64,
    pub track_id: TrackId,
}

/// Configuration for the music player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Initial volume (0-100, default: 75)
    pub volume: u8,

    /// Suggested tracks requested per fetch (default: 20)
    pub suggested_limit: usize,

    /// Top tracks requested per fetch (default: 10)
    pub top_limit: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: 75,
            suggested_limit: 20,
            top_limit: 10,
        }
    }
}
