/// Core error types for Spindle
use crate::types::SongId;
use thiserror::Error;

/// Result type alias using `SpindleError`
pub type Result<T> = std::result::Result<T, SpindleError>;

/// Core error type for Spindle
///
/// Only `CatalogFetchFailed` is fatal to a playback session; everything else
/// is recovered locally.
#[derive(Error, Debug)]
pub enum SpindleError {
    /// Playlist metadata could not be retrieved or parsed
    #[error("Playlist fetch failed: {0}")]
    CatalogFetchFailed(String),

    /// The cached-ids lookup failed
    #[error("Cached id lookup failed: {0}")]
    CachedIdsUnavailable(String),

    /// A single song's background download failed
    #[error("Download failed for {id}: {reason}")]
    SongDownloadFailed { id: SongId, reason: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl SpindleError {
    /// Create a catalog fetch error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::CatalogFetchFailed(msg.into())
    }

    /// Create a per-song download error
    pub fn download(id: SongId, reason: impl Into<String>) -> Self {
        Self::SongDownloadFailed {
            id,
            reason: reason.into(),
        }
    }

    /// Whether this error ends the playback session
    pub fn is_session_fatal(&self) -> bool {
        matches!(
            self,
            Self::CatalogFetchFailed(_) | Self::CachedIdsUnavailable(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_errors_are_fatal() {
        assert!(SpindleError::catalog("401").is_session_fatal());
        assert!(SpindleError::CachedIdsUnavailable("down".into()).is_session_fatal());
    }

    #[test]
    fn download_errors_are_recoverable() {
        let err = SpindleError::download(SongId::new("a"), "connection reset");
        assert!(!err.is_session_fatal());
        assert_eq!(err.to_string(), "Download failed for a: connection reset");
    }
}
