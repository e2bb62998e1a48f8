//! Request/response plumbing shared by the sub-clients.

use crate::error::{Result, ServerClientError};
use crate::types::ErrorBody;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::warn;

/// Attach the bearer token, if any.
pub(crate) fn authorize(builder: RequestBuilder, access_token: Option<&str>) -> RequestBuilder {
    match access_token {
        Some(token) => builder.bearer_auth(token),
        None => builder,
    }
}

/// Send a request, classifying connection failures.
pub(crate) async fn send(builder: RequestBuilder) -> Result<Response> {
    builder.send().await.map_err(|e| {
        if e.is_connect() || e.is_timeout() {
            ServerClientError::ServerUnreachable(e.to_string())
        } else {
            ServerClientError::Request(e)
        }
    })
}

/// Decode a successful JSON response, or turn a failed one into an error.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    if !response.status().is_success() {
        return Err(error_from(response).await);
    }

    response.json().await.map_err(|e| {
        ServerClientError::ParseError(format!("Failed to parse {} response: {}", what, e))
    })
}

/// Succeed on any 2xx, ignoring the body.
pub(crate) async fn expect_success(response: Response) -> Result<()> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_from(response).await)
    }
}

/// Map a non-2xx response onto the client error taxonomy.
///
/// The server reports `{ "message": ... }`; plain-text bodies are kept as is.
pub(crate) async fn error_from(response: Response) -> ServerClientError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.message)
        .unwrap_or(text);

    match status {
        StatusCode::UNAUTHORIZED => ServerClientError::AuthRequired,
        StatusCode::FORBIDDEN => ServerClientError::AccessDenied(message),
        StatusCode::BAD_REQUEST => ServerClientError::BadRequest(message),
        _ => {
            warn!(status = %status, error = %message, "Server returned an error");
            ServerClientError::ServerError {
                status: status.as_u16(),
                message,
            }
        }
    }
}
