//! Song catalog adapter
//!
//! Turns raw playlist-metadata records into normalized [`Song`]s. Pure and
//! deterministic: the same inputs always give the same songs in the same
//! order.

use crate::types::{
    PlaylistItem, PlaylistSummary, PlaylistTracks, RawTrack, Song, SongId, UserPlaylists,
    UNKNOWN_ARTIST,
};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};

/// Normalize a playlist's raw tracks, tagging each song with its cached status
///
/// Items without a track or without an id cannot be identified and are
/// skipped, as are ids that are not plain catalog ids. A repeated id keeps
/// its first occurrence.
pub fn normalize(raw: &PlaylistTracks, cached_ids: &HashSet<SongId>) -> Vec<Song> {
    let mut seen = HashSet::with_capacity(raw.items.len());
    let mut songs = Vec::with_capacity(raw.items.len());

    for (position, item) in raw.items.iter().enumerate() {
        let Some(song) = normalize_item(item) else {
            debug!(position, "Skipping playlist item without a track id");
            continue;
        };

        if !seen.insert(song.id.clone()) {
            warn!(song_id = %song.id, position, "Duplicate track id in playlist, keeping first");
            continue;
        }

        let cached = cached_ids.contains(&song.id);
        songs.push(song.with_cached(cached));
    }

    songs
}

fn normalize_item(item: &PlaylistItem) -> Option<Song> {
    let track = item.track.as_ref()?;
    let id = SongId::new(track.id.as_deref()?);
    if !id.is_catalog_id() {
        if !id.is_empty() {
            warn!(song_id = %id, "Skipping track with an unusable id");
        }
        return None;
    }

    let mut song = Song::new(id, track.name.clone().unwrap_or_default())
        .with_artist(artist_line(track))
        .with_duration(Duration::from_millis(track.duration_ms.unwrap_or(0)));

    if let Some(album) = &track.album {
        if let Some(name) = &album.name {
            song = song.with_album(name.clone());
        }
        if let Some(image) = album.images.first() {
            song = song.with_cover_url(image.url.clone());
        }
    }

    if let Some(date_added) = item.added_at.as_deref().and_then(parse_timestamp) {
        song = song.with_date_added(date_added);
    }

    Some(song)
}

fn artist_line(track: &RawTrack) -> String {
    let names: Vec<&str> = track
        .artists
        .iter()
        .filter_map(|artist| artist.name.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();

    if names.is_empty() {
        UNKNOWN_ARTIST.to_string()
    } else {
        names.join(", ")
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

/// Normalize the user's playlists for the playlist picker
pub fn normalize_playlists(raw: &UserPlaylists) -> Vec<PlaylistSummary> {
    raw.items
        .iter()
        .map(|playlist| PlaylistSummary {
            id: playlist.id.clone(),
            name: playlist.name.clone().unwrap_or_default(),
            cover_url: playlist.images.first().map(|image| image.url.clone()),
            track_count: playlist.tracks.as_ref().and_then(|tracks| tracks.total),
        })
        .collect()
}
