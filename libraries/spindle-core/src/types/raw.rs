//! Raw playlist-metadata records
//!
//! These mirror the Web API JSON closely enough to deserialize it directly.
//! Everything except the shape itself is optional: `null` and missing fields
//! both fall back to defaults so one odd track never fails a whole page.

use serde::{Deserialize, Deserializer, Serialize};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One page (or several merged pages) of a playlist's tracks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistTracks {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<PlaylistItem>,

    /// URL of the next page, if any
    #[serde(default)]
    pub next: Option<String>,

    #[serde(default)]
    pub total: Option<u32>,
}

impl PlaylistTracks {
    /// Append another page, taking over its `next` link
    pub fn extend(&mut self, page: PlaylistTracks) {
        self.items.extend(page.items);
        self.next = page.next;
        if page.total.is_some() {
            self.total = page.total;
        }
    }
}

/// A playlist entry: when it was added plus the track itself
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub added_at: Option<String>,

    /// `null` for removed or local-file entries
    #[serde(default)]
    pub track: Option<RawTrack>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTrack {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<RawArtist>,

    #[serde(default)]
    pub album: Option<RawAlbum>,

    #[serde(default)]
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawArtist {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAlbum {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<RawImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawImage {
    pub url: String,

    #[serde(default)]
    pub height: Option<u32>,

    #[serde(default)]
    pub width: Option<u32>,
}

/// One page of the current user's playlists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPlaylists {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<RawPlaylist>,

    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPlaylist {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<RawImage>,

    #[serde(default)]
    pub tracks: Option<RawTrackCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTrackCount {
    #[serde(default)]
    pub total: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerates_nulls() {
        let page: PlaylistTracks = serde_json::from_str(
            r#"{
                "items": [
                    { "added_at": null, "track": null },
                    { "track": { "id": "x", "name": null, "artists": null,
                                 "album": { "name": null, "images": null },
                                 "duration_ms": null } }
                ],
                "next": null
            }"#,
        )
        .unwrap();

        assert_eq!(page.items.len(), 2);
        assert!(page.items[0].track.is_none());
        let track = page.items[1].track.as_ref().unwrap();
        assert!(track.artists.is_empty());
        assert!(track.album.as_ref().unwrap().images.is_empty());
    }

    #[test]
    fn extend_takes_next_link_of_last_page() {
        let mut first = PlaylistTracks {
            items: vec![PlaylistItem::default()],
            next: Some("page-2".into()),
            total: Some(2),
        };
        first.extend(PlaylistTracks {
            items: vec![PlaylistItem::default()],
            next: None,
            total: None,
        });

        assert_eq!(first.items.len(), 2);
        assert!(first.next.is_none());
        assert_eq!(first.total, Some(2));
    }
}
