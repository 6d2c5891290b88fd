//! Domain types for Spindle

mod ids;
mod raw;
mod song;

pub use ids::SongId;
pub use raw::{
    PlaylistItem, PlaylistTracks, RawAlbum, RawArtist, RawImage, RawPlaylist, RawTrack,
    RawTrackCount, UserPlaylists,
};
pub use song::{PlaylistSummary, Song, UNKNOWN_ARTIST};
