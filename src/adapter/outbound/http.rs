//! Shared REST plumbing for venue clients.

use std::time::Duration;

use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{Result, VenueError};
use crate::infrastructure::config::HttpConfig;

/// Build an HTTP client honoring the configured timeouts.
pub(crate) fn build_client(config: &HttpConfig) -> HttpClient {
    HttpClient::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        .build()
        .unwrap_or_else(|err| {
            warn!(error = %err, "Failed to build HTTP client, using defaults");
            HttpClient::new()
        })
}

/// Join a base URL and an absolute endpoint path.
pub(crate) fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), endpoint)
}

/// Reject non-success statuses with a [`VenueError`].
pub(crate) fn check_status(
    venue: &'static str,
    endpoint: &str,
    response: Response,
) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(VenueError::from_status(venue, endpoint, status.as_u16()).into())
}

/// Check the status and decode the JSON body.
pub(crate) async fn read_json<T>(
    venue: &'static str,
    endpoint: &str,
    response: Response,
) -> Result<T>
where
    T: DeserializeOwned,
{
    let response = check_status(venue, endpoint, response)?;
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
