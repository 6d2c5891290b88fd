//! Error types for playback management

use spindle_core::SongId;
use thiserror::Error;

/// Failure reported by an audio engine
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct EngineError(pub String);

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The id is not in the current song list
    #[error("Song not found: {0}")]
    SongNotFound(SongId),

    /// The song's audio is not available locally yet
    #[error("Song not cached yet: {0}")]
    SongNotCached(SongId),

    /// Audio engine error
    #[error("Audio engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
