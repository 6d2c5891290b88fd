//! Connection settings for the two HTTP services.

use serde::{Deserialize, Serialize};

/// Default playlist-metadata API
pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Default local cache server
pub const DEFAULT_CACHE_BASE_URL: &str = "http://localhost:9999";

/// Settings for the playlist-metadata API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL, e.g. "https://api.spotify.com/v1"
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_catalog_timeout")]
    pub request_timeout_secs: u64,
}

impl CatalogConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_catalog_timeout(),
        }
    }
}

/// Settings for the local cache server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Base URL, e.g. "http://localhost:9999"
    #[serde(default = "default_cache_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds; a download can take a while
    #[serde(default = "default_cache_timeout")]
    pub request_timeout_secs: u64,
}

impl CacheConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            base_url: default_cache_base_url(),
            request_timeout_secs: default_cache_timeout(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_cache_base_url() -> String {
    DEFAULT_CACHE_BASE_URL.to_string()
}

fn default_catalog_timeout() -> u64 {
    30
}

fn default_cache_timeout() -> u64 {
    300
}
