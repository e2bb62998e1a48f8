//! Like/unlike operations.

use crate::error::{Result, ServerClientError};
use crate::response::{error_from, read_json, send};
use reqwest::{Client, StatusCode};
use tracing::{debug, info};
use tune_core::{LikeRecord, TrackId, UserId};

/// Likes client for the Tune Stream server.
///
/// Every endpoint requires an authenticated caller.
pub struct LikesClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: &'a str,
}

impl<'a> LikesClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: &'a str) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Like a track.
    ///
    /// The server answers 400 when the like already exists; that is reported
    /// as [`ServerClientError::AlreadyLiked`].
    pub async fn like(&self, id: TrackId) -> Result<LikeRecord> {
        let url = format!("{}/api/songs/{}/like", self.base_url, id);
        debug!(url = %url, track_id = %id, "Liking song");

        let response = send(self.http.post(&url).bearer_auth(self.access_token)).await?;

        if response.status() == StatusCode::BAD_REQUEST {
            return Err(match error_from(response).await {
                ServerClientError::BadRequest(msg) if msg.contains("already liked") => {
                    ServerClientError::AlreadyLiked(id)
                }
                other => other,
            });
        }

        let like: LikeRecord = read_json(response, "like").await?;
        info!(track_id = %id, like_id = like.id, "Song liked");
        Ok(like)
    }

    /// Remove a like. Removing a like that does not exist succeeds.
    pub async fn unlike(&self, id: TrackId) -> Result<()> {
        let url = format!("{}/api/songs/{}/like", self.base_url, id);
        debug!(url = %url, track_id = %id, "Unliking song");

        let response = send(self.http.delete(&url).bearer_auth(self.access_token)).await?;

        if response.status().is_success() {
            info!(track_id = %id, "Song unliked");
            Ok(())
        } else {
            Err(error_from(response).await)
        }
    }

    /// IDs of every track the user has liked.
    pub async fn for_user(&self, user_id: &UserId) -> Result<Vec<TrackId>> {
        let url = format!("{}/api/users/{}/likes", self.base_url, user_id);
        debug!(url = %url, user_id = %user_id, "Fetching user likes");

        let response = send(self.http.get(&url).bearer_auth(self.access_token)).await?;
        let likes: Vec<TrackId> = read_json(response, "user likes").await?;

        debug!(count = likes.len(), "Fetched user likes");
        Ok(likes)
    }
}
