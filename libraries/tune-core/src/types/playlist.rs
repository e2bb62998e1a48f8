/// Playlist domain types
use crate::types::{PlaylistId, Track, TrackId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub cover_image_url: Option<String>,

    /// Owner user ID
    pub user_id: UserId,

    #[serde(default)]
    pub is_public: bool,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Playlist membership row
///
/// The server joins the song in when listing a playlist's contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistEntry {
    pub id: i64,

    pub playlist_id: PlaylistId,

    pub song_id: TrackId,

    /// Position in the playlist
    pub position: i32,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub song: Option<Track>,
}

impl PlaylistEntry {
    /// Order entries by position and keep the ones that carry their song
    pub fn into_tracks(mut entries: Vec<PlaylistEntry>) -> Vec<Track> {
        entries.sort_by_key(|entry| entry.position);
        entries.into_iter().filter_map(|entry| entry.song).collect()
    }
}

/// Request body for playlist creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlaylist {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,

    pub is_public: bool,
}

impl NewPlaylist {
    /// Create a private playlist with just a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            cover_image_url: None,
            is_public: false,
        }
    }
}
