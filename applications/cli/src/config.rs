/// Player configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use spindle_client::{CacheConfig, CatalogConfig};
use spindle_playback::{PlaybackConfig, DEFAULT_REDIRECT_TARGET};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "spindle.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub navigation: NavigationSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NavigationSettings {
    /// Where to go when the playlist cannot be loaded
    #[serde(default = "default_redirect_target")]
    pub redirect_target: String,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            redirect_target: default_redirect_target(),
        }
    }
}

fn default_redirect_target() -> String {
    DEFAULT_REDIRECT_TARGET.to_string()
}

impl PlayerConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `spindle.toml` is read if
    /// present. `SPINDLE_*` variables override both, with `__` between
    /// section and key (`SPINDLE_PLAYBACK__VOLUME=40`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, None)
    }

    /// Like [`PlayerConfig::load`], reading variables from `env` instead of
    /// the process environment when given
    pub fn load_from(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("SPINDLE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: PlayerConfig = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        check_http_url("catalog.api_base_url", &self.catalog.api_base_url)?;
        check_http_url("cache.base_url", &self.cache.base_url)?;

        if self.playback.tick_interval_ms == 0 {
            return Err(CliError::Config(
                "playback.tick_interval_ms must be greater than zero".into(),
            ));
        }

        if self.navigation.redirect_target.trim().is_empty() {
            return Err(CliError::Config(
                "navigation.redirect_target cannot be empty".into(),
            ));
        }

        Ok(())
    }
}

fn check_http_url(key: &str, value: &str) -> Result<()> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CliError::Config(format!("{key} cannot be empty")));
    }
    if !value.starts_with("http://") && !value.starts_with("https://") {
        return Err(CliError::Config(format!(
            "{key} must start with http:// or https://"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = PlayerConfig::default();
        config.validate().unwrap();
        assert_eq!(config.cache.base_url, "http://localhost:9999");
        assert_eq!(config.navigation.redirect_target, "/");
        assert_eq!(config.playback.volume, 100);
    }

    #[test]
    fn zero_tick_interval_rejected() {
        let mut config = PlayerConfig::default();
        config.playback.tick_interval_ms = 0;
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn non_http_cache_rejected() {
        let mut config = PlayerConfig::default();
        config.cache.base_url = "localhost:9999".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cache.base_url"));
    }
}
