//! Identity resolution for the Tune Stream server.

use crate::error::Result;
use crate::response::{read_json, send};
use reqwest::Client;
use tracing::{debug, info};
use tune_core::User;

/// Authentication client for the Tune Stream server.
///
/// Token issuance happens outside this crate; this client only resolves who a
/// token belongs to.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: &'a str) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// The user behind the current token.
    ///
    /// A rejected token yields [`ServerClientError::AuthRequired`](crate::ServerClientError::AuthRequired).
    pub async fn current_user(&self) -> Result<User> {
        let url = format!("{}/api/auth/user", self.base_url);
        debug!(url = %url, "Resolving current user");

        let response = send(self.http.get(&url).bearer_auth(self.access_token)).await?;
        let user: User = read_json(response, "user").await?;

        info!(user_id = %user.id, "Resolved current user");
        Ok(user)
    }
}
