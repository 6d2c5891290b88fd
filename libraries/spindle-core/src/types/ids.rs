/// ID types for Spindle entities
use serde::{Deserialize, Serialize};
use std::fmt;

/// Track identifier, unique within one playlist
///
/// Surrounding whitespace is trimmed on construction, so two ids compare
/// equal exactly when their trimmed forms do.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SongId(String);

impl SongId {
    /// Create a new song ID
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.len() == id.len() {
            Self(id)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is empty after trimming
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the id is a plain catalog id (ASCII letters and digits only)
    ///
    /// Only such ids may name a cache file or a cache server route.
    pub fn is_catalog_id(&self) -> bool {
        !self.0.is_empty() && self.0.bytes().all(|b| b.is_ascii_alphanumeric())
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SongId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<&str> for SongId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<SongId> for String {
    fn from(id: SongId) -> Self {
        id.0
    }
}
