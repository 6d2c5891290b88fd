//! Error types for the HTTP adapters.

use spindle_core::SpindleError;
use thiserror::Error;

/// Errors that can occur when talking to the catalog API or the cache server.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The token was rejected (missing, invalid or expired)
    #[error("Authentication required")]
    AuthRequired,

    /// Invalid base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a response body
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ClientError {
    /// Whether the error means the token needs replacing
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::AuthRequired)
    }
}

/// Catalog-side failures; the cache server maps its errors explicitly.
impl From<ClientError> for SpindleError {
    fn from(e: ClientError) -> Self {
        SpindleError::CatalogFetchFailed(e.to_string())
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
