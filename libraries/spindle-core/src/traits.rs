/// Boundary traits for Spindle's external collaborators
use crate::error::Result;
use crate::types::{PlaylistTracks, SongId};
use async_trait::async_trait;
use std::collections::HashSet;

/// Playlist metadata service
///
/// Implementations return every page of the playlist merged into one
/// `PlaylistTracks`. Any failure (network, auth, parse) is reported as an
/// error; callers treat it as session-fatal.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch all tracks of a playlist
    async fn fetch_playlist(&self, playlist_id: &str) -> Result<PlaylistTracks>;
}

/// Lookup of tracks already saved locally
#[async_trait]
pub trait CachedIdsSource: Send + Sync {
    /// Ids whose audio is already available
    async fn cached_ids(&self) -> Result<HashSet<SongId>>;
}

/// Per-song background download
///
/// The only observable outcome is success or failure; both count as
/// "attempted".
#[async_trait]
pub trait SongFetcher: Send + Sync {
    /// Fetch one song's audio into the local cache
    async fn fetch_song(&self, id: &SongId) -> Result<()>;
}
