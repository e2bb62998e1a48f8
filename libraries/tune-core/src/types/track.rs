/// Track domain type
use crate::types::{TrackId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single playable song
///
/// Immutable on the client once fetched; only the server increments `plays`.
/// The wire format is the server's camelCase JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    pub title: String,

    pub artist: String,

    #[serde(default)]
    pub album: Option<String>,

    #[serde(default)]
    pub genre: Option<String>,

    /// Authoritative length in seconds
    pub duration: u32,

    /// Media resource locator
    pub file_url: String,

    #[serde(default)]
    pub cover_image_url: Option<String>,

    /// Uploader identity
    #[serde(default)]
    pub uploaded_by: Option<UserId>,

    /// Server-side play count (absent on freshly uploaded rows)
    #[serde(default)]
    pub plays: Option<u64>,

    #[serde(default = "default_public")]
    pub is_public: bool,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_public() -> bool {
    true
}

impl Track {
    /// Create a public track with the required fields
    pub fn new(
        id: TrackId,
        title: impl Into<String>,
        artist: impl Into<String>,
        duration: u32,
        file_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            album: None,
            genre: None,
            duration,
            file_url: file_url.into(),
            cover_image_url: None,
            uploaded_by: None,
            plays: None,
            is_public: true,
            created_at: None,
            updated_at: None,
        }
    }

    /// Play count as last seen from the server (0 when unknown)
    pub fn play_count(&self) -> u64 {
        self.plays.unwrap_or(0)
    }

    /// Duration in seconds as a float, the unit the playback engine works in
    pub fn duration_secs(&self) -> f64 {
        f64::from(self.duration)
    }

    /// Bump the locally cached play count
    ///
    /// Never lowers the count: the server is authoritative and monotonic.
    pub fn record_local_play(&mut self) {
        self.plays = Some(self.play_count().saturating_add(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_server_json() {
        let json = r#"{
            "id": 3,
            "title": "Night Drive",
            "artist": "Neon",
            "album": null,
            "genre": "Synthwave",
            "duration": 214,
            "fileUrl": "/uploads/audio-1.mp3",
            "coverImageUrl": "/uploads/cover-1.png",
            "uploadedBy": "u-9",
            "plays": 12,
            "isPublic": true,
            "createdAt": "2024-05-01T10:00:00.000Z",
            "updatedAt": "2024-05-01T10:00:00.000Z"
        }"#;

        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.id, TrackId::new(3));
        assert_eq!(track.file_url, "/uploads/audio-1.mp3");
        assert_eq!(track.uploaded_by, Some(UserId::new("u-9")));
        assert_eq!(track.play_count(), 12);
        assert!(track.album.is_none());
        assert!(track.created_at.is_some());
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{"id":1,"title":"A","artist":"B","duration":60,"fileUrl":"/a.mp3"}"#;
        let track: Track = serde_json::from_str(json).unwrap();
        assert!(track.is_public);
        assert_eq!(track.play_count(), 0);
    }

    #[test]
    fn local_play_count_only_grows() {
        let mut track = Track::new(TrackId::new(1), "A", "B", 60, "/a.mp3");
        track.record_local_play();
        track.record_local_play();
        assert_eq!(track.play_count(), 2);

        track.plays = Some(u64::MAX);
        track.record_local_play();
        assert_eq!(track.play_count(), u64::MAX);
    }
}
