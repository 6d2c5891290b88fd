//! Normalized song entity

use super::SongId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Artist shown when the catalog has none
pub const UNKNOWN_ARTIST: &str = "unknown";

/// A playlist track plus its local cache status
///
/// `cached` is monotonic: it can be set with [`Song::mark_cached`] but never
/// cleared, so it is kept private.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Stable track identifier
    pub id: SongId,

    /// Track title
    pub title: String,

    /// Artist name(s), comma separated
    pub artist: String,

    /// Album name (empty when unknown)
    pub album: String,

    /// Cover image URL
    pub cover_url: Option<String>,

    /// When the track was added to the playlist
    pub date_added: Option<DateTime<Utc>>,

    /// Track duration
    pub duration: Duration,

    cached: bool,
}

impl Song {
    /// Create a song with only an id and title; everything else defaults
    pub fn new(id: impl Into<SongId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: UNKNOWN_ARTIST.to_string(),
            album: String::new(),
            cover_url: None,
            date_added: None,
            duration: Duration::ZERO,
            cached: false,
        }
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    pub fn with_cover_url(mut self, url: impl Into<String>) -> Self {
        self.cover_url = Some(url.into());
        self
    }

    pub fn with_date_added(mut self, date_added: DateTime<Utc>) -> Self {
        self.date_added = Some(date_added);
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the initial cache status
    pub fn with_cached(mut self, cached: bool) -> Self {
        self.cached = cached;
        self
    }

    /// Whether the audio is available locally (the song is playable)
    pub fn is_cached(&self) -> bool {
        self.cached
    }

    /// Mark the audio as available locally
    ///
    /// Returns `true` if the flag changed.
    pub fn mark_cached(&mut self) -> bool {
        let changed = !self.cached;
        self.cached = true;
        changed
    }
}

/// One entry of the user's playlist picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub cover_url: Option<String>,
    pub track_count: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let song = Song::new("a", "Title");
        assert_eq!(song.artist, UNKNOWN_ARTIST);
        assert!(song.cover_url.is_none());
        assert!(!song.is_cached());
    }

    #[test]
    fn mark_cached_is_monotonic() {
        let mut song = Song::new("a", "Title");
        assert!(song.mark_cached());
        assert!(!song.mark_cached());
        assert!(song.is_cached());
    }
}
