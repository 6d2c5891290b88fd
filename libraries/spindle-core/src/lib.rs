//! Spindle Core
//!
//! Song types, the catalog adapter, and the boundary traits shared by every
//! Spindle crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `SongId`, `Song`, `PlaylistSummary`
//! - **Raw Catalog Records**: the playlist-metadata shapes as they come off
//!   the wire (`PlaylistTracks`, `PlaylistItem`, `RawTrack`, ...)
//! - **Catalog Adapter**: `normalize` turns raw records into `Song`s tagged
//!   with their cached status
//! - **Boundary Traits**: `CatalogSource`, `CachedIdsSource`, `SongFetcher`
//! - **Error Handling**: unified `SpindleError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use spindle_core::{normalize, PlaylistTracks, SongId};
//! use std::collections::HashSet;
//!
//! let raw: PlaylistTracks = serde_json::from_str(r#"{
//!     "items": [
//!         { "added_at": "2023-01-05T10:00:00Z",
//!           "track": { "id": "abc", "name": "Song", "duration_ms": 1000,
//!                      "artists": [], "album": { "name": "LP", "images": [] } } }
//!     ]
//! }"#).unwrap();
//!
//! let cached: HashSet<SongId> = [SongId::new("abc")].into_iter().collect();
//! let songs = normalize(&raw, &cached);
//!
//! assert_eq!(songs.len(), 1);
//! assert_eq!(songs[0].artist, "unknown");
//! assert!(songs[0].is_cached());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use catalog::{normalize, normalize_playlists};
pub use error::{Result, SpindleError};
pub use traits::{CachedIdsSource, CatalogSource, SongFetcher};
pub use types::{
    PlaylistItem, PlaylistSummary, PlaylistTracks, RawAlbum, RawArtist, RawImage, RawPlaylist,
    RawTrack, RawTrackCount, Song, SongId, UserPlaylists, UNKNOWN_ARTIST,
};
