/// Core traits for Tune Stream
use crate::error::Result;
use crate::types::{
    LikeRecord, NewPlaylist, Playlist, PlaylistEntry, PlaylistId, Track, TrackId, User, UserId,
};
use async_trait::async_trait;

/// Remote data gateway
///
/// Request/response contract for the remote operations the player consumes.
/// Transport and authentication mechanics belong to the implementation; every
/// failure is reported through [`TuneError`](crate::TuneError).
#[async_trait]
pub trait MusicGateway: Send + Sync {
    /// Fetch suggested tracks, personalised when an identity is supplied
    async fn fetch_suggested(&self, identity: Option<&UserId>, limit: usize) -> Result<Vec<Track>>;

    /// Fetch the most played public tracks, ranked by play count (descending)
    async fn fetch_top(&self, limit: usize) -> Result<Vec<Track>>;

    /// Fetch every track visible to the caller
    async fn fetch_tracks(&self) -> Result<Vec<Track>>;

    /// Fetch a single track
    ///
    /// # Errors
    /// `TrackNotFound` when the server has no such track
    async fn fetch_track(&self, id: TrackId) -> Result<Track>;

    /// Record one play of a track
    ///
    /// Callers treat this as fire-and-forget: failures are logged, never surfaced.
    async fn increment_play_count(&self, id: TrackId) -> Result<()>;

    /// Like a track for the authenticated identity
    ///
    /// # Errors
    /// `LikeConflict` if the track is already liked
    async fn like(&self, id: TrackId) -> Result<LikeRecord>;

    /// Remove a like for the authenticated identity
    async fn unlike(&self, id: TrackId) -> Result<()>;

    /// Resolve the authenticated user behind the current credentials
    async fn current_user(&self) -> Result<User>;

    /// Identifiers of every track the user has liked
    async fn fetch_user_likes(&self, user_id: &UserId) -> Result<Vec<TrackId>>;

    /// Playlists owned by the user, newest first
    async fn fetch_playlists(&self, user_id: &UserId) -> Result<Vec<Playlist>>;

    /// Membership rows of a playlist, ordered by position
    async fn fetch_playlist_entries(&self, playlist_id: PlaylistId) -> Result<Vec<PlaylistEntry>>;

    /// Create a playlist owned by the authenticated identity
    async fn create_playlist(&self, playlist: &NewPlaylist) -> Result<Playlist>;
}
