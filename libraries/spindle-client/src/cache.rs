//! Local song cache server client.
//!
//! The cache server keeps downloaded audio on disk. It answers two calls:
//! `GET /getSavedIds` lists what is already saved, and `GET /{id}` downloads
//! one song (any 2xx means it is now saved).

use crate::error::{ClientError, Result};
use crate::http::{build_http, error_for, normalize_base_url, read_json};
use crate::types::CacheConfig;
use async_trait::async_trait;
use reqwest::Client;
use spindle_core::{CachedIdsSource, SongFetcher, SongId, SpindleError};
use std::collections::HashSet;
use tracing::debug;

/// Client for the local cache server.
pub struct CacheServerClient {
    http: Client,
    base_url: String,
}

impl CacheServerClient {
    /// Create a new client.
    pub fn new(config: &CacheConfig) -> Result<Self> {
        Ok(Self {
            http: build_http(config.request_timeout_secs)?,
            base_url: normalize_base_url(&config.base_url)?,
        })
    }

    /// Normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ids of songs already saved locally.
    pub async fn saved_ids(&self) -> Result<HashSet<SongId>> {
        let url = format!("{}/getSavedIds", self.base_url);
        debug!(url = %url, "Fetching saved ids");

        let response = self.http.get(&url).send().await?;
        let ids: Vec<String> = read_json(response, "saved ids").await?;

        Ok(ids
            .into_iter()
            .map(SongId::from)
            .filter(|id| !id.is_empty())
            .collect())
    }

    /// Ask the server to download one song.
    pub async fn download(&self, id: &SongId) -> Result<()> {
        if !id.is_catalog_id() {
            return Err(ClientError::InvalidUrl(format!("song id '{id}' is not a catalog id")));
        }

        let url = format!("{}/{}", self.base_url, id);
        debug!(url = %url, song_id = %id, "Requesting song download");

        let response = self.http.get(&url).send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_for(response).await)
        }
    }
}

#[async_trait]
impl CachedIdsSource for CacheServerClient {
    async fn cached_ids(&self) -> spindle_core::Result<HashSet<SongId>> {
        self.saved_ids()
            .await
            .map_err(|e| SpindleError::CachedIdsUnavailable(e.to_string()))
    }
}

#[async_trait]
impl SongFetcher for CacheServerClient {
    async fn fetch_song(&self, id: &SongId) -> spindle_core::Result<()> {
        self.download(id)
            .await
            .map_err(|e| SpindleError::download(id.clone(), e.to_string()))
    }
}
