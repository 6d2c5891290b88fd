//! Shared HTTP plumbing.

use crate::error::{ClientError, Result};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Validate a base URL and strip trailing slashes.
pub(crate) fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let parsed =
        Url::parse(trimmed).map_err(|e| ClientError::InvalidUrl(format!("{trimmed}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

/// HTTP client with Spindle's defaults.
pub(crate) fn build_http(timeout_secs: u64) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs.max(1)))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(format!("Spindle/{}", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Turn a non-success response into an error.
pub(crate) async fn error_for(response: Response) -> ClientError {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return ClientError::AuthRequired;
    }

    let message = response.text().await.unwrap_or_default();
    ClientError::Server {
        status: status.as_u16(),
        message,
    }
}

/// Decode a successful JSON response, or report the failure.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    if !response.status().is_success() {
        return Err(error_for(response).await);
    }

    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| ClientError::Parse(format!("Failed to parse {what}: {e}")))
}
