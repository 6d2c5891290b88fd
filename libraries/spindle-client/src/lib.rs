//! Spindle Client
//!
//! HTTP adapters for Spindle's external services.
//!
//! # Features
//!
//! - **Catalog**: fetch a playlist's tracks (all pages) and the current
//!   user's playlists with a bearer token
//! - **Cache server**: list already-saved song ids and trigger per-song
//!   downloads
//!
//! Both clients implement the boundary traits from `spindle-core`, so a
//! playback session can use them directly.
//!
//! # Example
//!
//! ```ignore
//! use spindle_client::{CacheConfig, CacheServerClient, CatalogClient, CatalogConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = CatalogClient::new(&CatalogConfig::default(), "token")?;
//!     let cache = CacheServerClient::new(&CacheConfig::default())?;
//!
//!     let tracks = catalog.playlist_tracks("37i9dQZF1DXcBWIGoYBM5M").await?;
//!     let saved = cache.saved_ids().await?;
//!     println!("{} tracks, {} saved", tracks.items.len(), saved.len());
//!
//!     Ok(())
//! }
//! ```

mod cache;
mod catalog;
mod error;
mod http;
mod types;

pub use cache::CacheServerClient;
pub use catalog::CatalogClient;
pub use error::{ClientError, Result};
pub use types::{CacheConfig, CatalogConfig, DEFAULT_API_BASE_URL, DEFAULT_CACHE_BASE_URL};
