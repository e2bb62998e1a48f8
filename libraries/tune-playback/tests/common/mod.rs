//! Shared test fixtures: a recording media backend and an in-memory gateway

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tune_core::{
    LikeRecord, MusicGateway, NewPlaylist, Playlist, PlaylistEntry, PlaylistId, Result, Track,
    TrackId, TuneError, User, UserId,
};
use tune_playback::{LoadToken, MediaBackend, PlaybackError};

// ===== Media backend =====

/// Command received by the backend
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Bind(TrackId),
    Start,
    Halt,
    SetPosition(f64),
    SetGain(f32),
}

/// Backend that records every command
///
/// The log is shared so tests can inspect it after the backend moved into
/// the engine.
#[derive(Clone, Default)]
pub struct RecordingBackend {
    pub calls: Arc<Mutex<Vec<BackendCall>>>,
    pub fail_bind: Arc<AtomicBool>,
    pub fail_start: Arc<AtomicBool>,
    pub last_token: Arc<Mutex<Option<LoadToken>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Commands other than gain changes
    pub fn transport_calls(&self) -> Vec<BackendCall> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, BackendCall::SetGain(_)))
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn last_token(&self) -> LoadToken {
        self.last_token.lock().unwrap().expect("nothing bound")
    }
}

impl MediaBackend for RecordingBackend {
    fn bind(&mut self, token: LoadToken, _locator: &str) -> tune_playback::Result<()> {
        *self.last_token.lock().unwrap() = Some(token);
        self.calls.lock().unwrap().push(BackendCall::Bind(token.track_id));
        if self.fail_bind.load(Ordering::SeqCst) {
            return Err(PlaybackError::Unsupported("audio/x-unknown".into()));
        }
        Ok(())
    }

    fn start(&mut self) -> tune_playback::Result<()> {
        if self.fail_start.load(Ordering::SeqCst) {
            return Err(PlaybackError::Blocked("user gesture required".into()));
        }
        self.calls.lock().unwrap().push(BackendCall::Start);
        Ok(())
    }

    fn halt(&mut self) {
        self.calls.lock().unwrap().push(BackendCall::Halt);
    }

    fn set_position(&mut self, seconds: f64) {
        self.calls.lock().unwrap().push(BackendCall::SetPosition(seconds));
    }

    fn set_gain(&mut self, gain: f32) {
        self.calls.lock().unwrap().push(BackendCall::SetGain(gain));
    }
}

// ===== Gateway =====

/// In-memory gateway holding server-side like state
#[derive(Default)]
pub struct FakeGateway {
    pub tracks: Vec<Track>,
    pub liked: Mutex<HashSet<TrackId>>,
    pub plays: Mutex<Vec<TrackId>>,
    pub playlists: HashMap<PlaylistId, Vec<PlaylistEntry>>,
    pub fail_likes: AtomicBool,
    pub fail_plays: AtomicBool,
}

impl FakeGateway {
    pub fn with_tracks(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            ..Self::default()
        }
    }

    pub fn plays(&self) -> Vec<TrackId> {
        self.plays.lock().unwrap().clone()
    }

    pub fn set_fail_likes(&self, fail: bool) {
        self.fail_likes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl MusicGateway for FakeGateway {
    async fn fetch_suggested(&self, identity: Option<&UserId>, limit: usize) -> Result<Vec<Track>> {
        let skip = usize::from(identity.is_some());
        Ok(self.tracks.iter().skip(skip).take(limit).cloned().collect())
    }

    async fn fetch_top(&self, limit: usize) -> Result<Vec<Track>> {
        let mut tracks = self.tracks.clone();
        tracks.sort_by_key(|t| std::cmp::Reverse(t.play_count()));
        tracks.truncate(limit);
        Ok(tracks)
    }

    async fn fetch_tracks(&self) -> Result<Vec<Track>> {
        Ok(self.tracks.clone())
    }

    async fn fetch_track(&self, id: TrackId) -> Result<Track> {
        self.tracks
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(TuneError::TrackNotFound(id))
    }

    async fn increment_play_count(&self, id: TrackId) -> Result<()> {
        if self.fail_plays.load(Ordering::SeqCst) {
            return Err(TuneError::network("play endpoint down"));
        }
        self.plays.lock().unwrap().push(id);
        Ok(())
    }

    async fn like(&self, id: TrackId) -> Result<LikeRecord> {
        if self.fail_likes.load(Ordering::SeqCst) {
            return Err(TuneError::network("connection reset"));
        }
        if !self.liked.lock().unwrap().insert(id) {
            return Err(TuneError::LikeConflict(id));
        }
        Ok(LikeRecord {
            id: id.get(),
            user_id: UserId::new("user-1"),
            song_id: id,
            created_at: None,
        })
    }

    async fn unlike(&self, id: TrackId) -> Result<()> {
        if self.fail_likes.load(Ordering::SeqCst) {
            return Err(TuneError::network("connection reset"));
        }
        self.liked.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn current_user(&self) -> Result<User> {
        Ok(User {
            id: UserId::new("user-1"),
            email: Some("listener@example.com".into()),
            first_name: None,
            last_name: None,
            profile_image_url: None,
        })
    }

    async fn fetch_user_likes(&self, _user_id: &UserId) -> Result<Vec<TrackId>> {
        let mut ids: Vec<TrackId> = self.liked.lock().unwrap().iter().copied().collect();
        ids.sort();
        Ok(ids)
    }

    async fn fetch_playlists(&self, user_id: &UserId) -> Result<Vec<Playlist>> {
        Ok(self
            .playlists
            .keys()
            .map(|id| Playlist {
                id: *id,
                name: format!("Playlist {id}"),
                description: None,
                cover_image_url: None,
                user_id: user_id.clone(),
                is_public: false,
                created_at: None,
                updated_at: None,
            })
            .collect())
    }

    async fn fetch_playlist_entries(&self, playlist_id: PlaylistId) -> Result<Vec<PlaylistEntry>> {
        self.playlists
            .get(&playlist_id)
            .cloned()
            .ok_or(TuneError::PlaylistNotFound(playlist_id))
    }

    async fn create_playlist(&self, playlist: &NewPlaylist) -> Result<Playlist> {
        Ok(Playlist {
            id: PlaylistId::new(99),
            name: playlist.name.clone(),
            description: playlist.description.clone(),
            cover_image_url: playlist.cover_image_url.clone(),
            user_id: UserId::new("user-1"),
            is_public: playlist.is_public,
            created_at: None,
            updated_at: None,
        })
    }
}

// ===== Fixtures =====

pub fn track(id: i64) -> Track {
    Track::new(
        TrackId::new(id),
        format!("Track {id}"),
        "Test Artist",
        180,
        format!("/uploads/{id}.mp3"),
    )
}

/// `[A, B, C]` as tracks 1, 2, 3
pub fn abc() -> Vec<Track> {
    vec![track(1), track(2), track(3)]
}

pub fn entry(playlist_id: PlaylistId, position: i32, song: Track) -> PlaylistEntry {
    PlaylistEntry {
        id: i64::from(position) + 100,
        playlist_id,
        song_id: song.id,
        position,
        created_at: None,
        song: Some(song),
    }
}
