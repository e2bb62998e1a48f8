//! `MusicGateway` implementation over HTTP.

use crate::client::TuneServerClient;
use async_trait::async_trait;
use tune_core::{
    LikeRecord, MusicGateway, NewPlaylist, Playlist, PlaylistEntry, PlaylistId, Result, Track,
    TrackId, User, UserId,
};

#[async_trait]
impl MusicGateway for TuneServerClient {
    async fn fetch_suggested(&self, identity: Option<&UserId>, limit: usize) -> Result<Vec<Track>> {
        // The server derives the user from the token; a request on behalf of
        // an anonymous identity must not carry one.
        let handle = match identity {
            Some(_) => self.handle().await,
            None => self.anonymous_handle().await,
        };
        Ok(handle.songs().suggested(limit).await?)
    }

    async fn fetch_top(&self, limit: usize) -> Result<Vec<Track>> {
        Ok(self.handle().await.songs().top(limit).await?)
    }

    async fn fetch_tracks(&self) -> Result<Vec<Track>> {
        Ok(self.handle().await.songs().all().await?)
    }

    async fn fetch_track(&self, id: TrackId) -> Result<Track> {
        match self.handle().await.songs().get(id).await {
            Err(crate::ServerClientError::NotFound { .. }) => {
                Err(tune_core::TuneError::TrackNotFound(id))
            }
            other => Ok(other?),
        }
    }

    async fn increment_play_count(&self, id: TrackId) -> Result<()> {
        Ok(self.handle().await.songs().record_play(id).await?)
    }

    async fn like(&self, id: TrackId) -> Result<LikeRecord> {
        let handle = self.handle().await;
        Ok(handle.likes()?.like(id).await?)
    }

    async fn unlike(&self, id: TrackId) -> Result<()> {
        let handle = self.handle().await;
        Ok(handle.likes()?.unlike(id).await?)
    }

    async fn current_user(&self) -> Result<User> {
        let handle = self.handle().await;
        Ok(handle.auth()?.current_user().await?)
    }

    async fn fetch_user_likes(&self, user_id: &UserId) -> Result<Vec<TrackId>> {
        let handle = self.handle().await;
        Ok(handle.likes()?.for_user(user_id).await?)
    }

    async fn fetch_playlists(&self, user_id: &UserId) -> Result<Vec<Playlist>> {
        Ok(self.handle().await.playlists().for_user(user_id).await?)
    }

    async fn fetch_playlist_entries(&self, playlist_id: PlaylistId) -> Result<Vec<PlaylistEntry>> {
        match self.handle().await.playlists().entries(playlist_id).await {
            Err(crate::ServerClientError::NotFound { .. }) => {
                Err(tune_core::TuneError::PlaylistNotFound(playlist_id))
            }
            other => Ok(other?),
        }
    }

    async fn create_playlist(&self, playlist: &NewPlaylist) -> Result<Playlist> {
        Ok(self.handle().await.playlists().create(playlist).await?)
    }
}
