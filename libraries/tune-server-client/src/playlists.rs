//! Playlist operations.

use crate::error::{Result, ServerClientError};
use crate::response::{authorize, read_json, send};
use reqwest::{Client, StatusCode};
use tracing::{debug, info};
use tune_core::{NewPlaylist, Playlist, PlaylistEntry, PlaylistId, UserId};

/// Playlists client for the Tune Stream server.
pub struct PlaylistsClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: Option<&'a str>,
}

impl<'a> PlaylistsClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: Option<&'a str>) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    fn token(&self) -> Result<&'a str> {
        self.access_token.ok_or(ServerClientError::AuthRequired)
    }

    /// Playlists owned by `user_id`. Only the owner may list them.
    pub async fn for_user(&self, user_id: &UserId) -> Result<Vec<Playlist>> {
        let url = format!("{}/api/playlists/{}", self.base_url, user_id);
        debug!(url = %url, user_id = %user_id, "Fetching playlists");

        let response = send(self.http.get(&url).bearer_auth(self.token()?)).await?;
        read_json(response, "playlists").await
    }

    /// Membership rows of a playlist, ordered by position.
    pub async fn entries(&self, playlist_id: PlaylistId) -> Result<Vec<PlaylistEntry>> {
        let url = format!("{}/api/playlists/{}/songs", self.base_url, playlist_id);
        debug!(url = %url, playlist_id = %playlist_id, "Fetching playlist songs");

        let response = send(authorize(self.http.get(&url), self.access_token)).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ServerClientError::NotFound {
                entity: "Playlist",
                id: playlist_id.to_string(),
            });
        }

        let mut entries: Vec<PlaylistEntry> = read_json(response, "playlist songs").await?;
        entries.sort_by_key(|entry| entry.position);
        Ok(entries)
    }

    /// Create a playlist owned by the caller.
    pub async fn create(&self, playlist: &NewPlaylist) -> Result<Playlist> {
        let url = format!("{}/api/playlists", self.base_url);
        debug!(url = %url, name = %playlist.name, "Creating playlist");

        let response = send(
            self.http
                .post(&url)
                .bearer_auth(self.token()?)
                .json(playlist),
        )
        .await?;

        let created: Playlist = read_json(response, "playlist").await?;
        info!(playlist_id = %created.id, name = %created.name, "Playlist created");
        Ok(created)
    }
}
