//! Playlist-metadata API client.

use crate::error::{ClientError, Result};
use crate::http::{build_http, normalize_base_url, read_json};
use crate::types::CatalogConfig;
use async_trait::async_trait;
use reqwest::Client;
use spindle_core::{
    normalize_playlists, CatalogSource, PlaylistSummary, PlaylistTracks, UserPlaylists,
};
use tracing::{debug, info};

/// Client for a Spotify-style Web API, authenticated with a bearer token.
///
/// Paged endpoints are followed through their `next` links until exhausted.
pub struct CatalogClient {
    http: Client,
    api_base: String,
    token: String,
}

impl CatalogClient {
    /// Create a new client.
    pub fn new(config: &CatalogConfig, token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ClientError::AuthRequired);
        }

        Ok(Self {
            http: build_http(config.request_timeout_secs)?,
            api_base: normalize_base_url(&config.api_base_url)?,
            token,
        })
    }

    /// Normalized API base URL.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Fetch every track of a playlist, merging all pages.
    pub async fn playlist_tracks(&self, playlist_id: &str) -> Result<PlaylistTracks> {
        let playlist_id = playlist_id.trim();
        if playlist_id.is_empty() {
            return Err(ClientError::InvalidUrl("playlist id cannot be empty".into()));
        }

        let first = format!("{}/playlists/{}/tracks", self.api_base, playlist_id);
        let mut tracks: PlaylistTracks = self.get_json(&first, "playlist tracks").await?;

        let mut pages = 1;
        while let Some(next) = tracks.next.clone() {
            let page: PlaylistTracks = self.get_json(&next, "playlist tracks").await?;
            tracks.extend(page);
            pages += 1;
        }

        info!(
            playlist_id = %playlist_id,
            items = tracks.items.len(),
            pages,
            "Fetched playlist tracks"
        );

        Ok(tracks)
    }

    /// List the current user's playlists.
    pub async fn user_playlists(&self) -> Result<Vec<PlaylistSummary>> {
        let mut url = Some(format!("{}/me/playlists", self.api_base));
        let mut playlists = Vec::new();

        while let Some(current) = url.take() {
            let page: UserPlaylists = self.get_json(&current, "user playlists").await?;
            playlists.extend(normalize_playlists(&page));
            url = page.next;
        }

        debug!(count = playlists.len(), "Fetched user playlists");
        Ok(playlists)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        debug!(url = %url, "Fetching {}", what);

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        read_json(response, what).await
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch_playlist(&self, playlist_id: &str) -> spindle_core::Result<PlaylistTracks> {
        Ok(self.playlist_tracks(playlist_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_is_rejected() {
        let result = CatalogClient::new(&CatalogConfig::default(), "  ");
        assert!(matches!(result, Err(ClientError::AuthRequired)));
    }

    #[test]
    fn base_url_is_normalized() {
        let client =
            CatalogClient::new(&CatalogConfig::new("https://api.example.com/v1/"), "t").unwrap();
        assert_eq!(client.api_base(), "https://api.example.com/v1");
    }
}
