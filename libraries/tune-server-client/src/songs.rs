//! Song catalogue operations.

use crate::error::{Result, ServerClientError};
use crate::response::{authorize, expect_success, read_json, send};
use reqwest::{Client, StatusCode};
use tracing::debug;
use tune_core::{Track, TrackId};

/// Songs client for the Tune Stream server.
///
/// Catalogue reads work anonymously; the token, when present, lets the server
/// personalise suggestions.
pub struct SongsClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: Option<&'a str>,
}

impl<'a> SongsClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: Option<&'a str>) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Suggested tracks for the caller.
    pub async fn suggested(&self, limit: usize) -> Result<Vec<Track>> {
        let url = format!("{}/api/songs/suggested?limit={}", self.base_url, limit);
        debug!(url = %url, "Fetching suggested songs");

        let response = send(authorize(self.http.get(&url), self.access_token)).await?;
        let tracks: Vec<Track> = read_json(response, "suggested songs").await?;

        debug!(count = tracks.len(), "Fetched suggested songs");
        Ok(tracks)
    }

    /// Most played public tracks.
    pub async fn top(&self, limit: usize) -> Result<Vec<Track>> {
        let url = format!("{}/api/songs/top-tunes?limit={}", self.base_url, limit);
        debug!(url = %url, "Fetching top tunes");

        let response = send(authorize(self.http.get(&url), self.access_token)).await?;
        let tracks: Vec<Track> = read_json(response, "top tunes").await?;

        debug!(count = tracks.len(), "Fetched top tunes");
        Ok(tracks)
    }

    /// Every track in the catalogue.
    pub async fn all(&self) -> Result<Vec<Track>> {
        let url = format!("{}/api/songs", self.base_url);
        debug!(url = %url, "Fetching songs");

        let response = send(authorize(self.http.get(&url), self.access_token)).await?;
        read_json(response, "songs").await
    }

    /// A single track by ID.
    pub async fn get(&self, id: TrackId) -> Result<Track> {
        let url = format!("{}/api/songs/{}", self.base_url, id);
        debug!(url = %url, track_id = %id, "Fetching song");

        let response = send(authorize(self.http.get(&url), self.access_token)).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ServerClientError::NotFound {
                entity: "Track",
                id: id.to_string(),
            });
        }

        read_json(response, "song").await
    }

    /// Increment the server-side play count.
    pub async fn record_play(&self, id: TrackId) -> Result<()> {
        let url = format!("{}/api/songs/{}/play", self.base_url, id);
        debug!(url = %url, track_id = %id, "Recording play");

        let response = send(authorize(self.http.post(&url), self.access_token)).await?;
        expect_success(response).await
    }
}
