//! Configuration loading from files and environment overrides

use spindle_cli::{CliError, PlayerConfig};
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
    Some(
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect(),
    )
}

#[test]
fn file_values_are_loaded() {
    let file = write_config(
        r#"
[catalog]
api_base_url = "https://api.example.com/v1"

[cache]
base_url = "http://127.0.0.1:7777"

[playback]
volume = 35
songs_dir = "/var/cache/spindle"
tick_interval_ms = 500

[navigation]
redirect_target = "/login"
"#,
    );

    let config = PlayerConfig::load_from(Some(file.path()), env(&[])).unwrap();

    assert_eq!(config.catalog.api_base_url, "https://api.example.com/v1");
    assert_eq!(config.catalog.request_timeout_secs, 30);
    assert_eq!(config.cache.base_url, "http://127.0.0.1:7777");
    assert_eq!(config.playback.volume, 35);
    assert_eq!(config.playback.songs_dir, PathBuf::from("/var/cache/spindle"));
    assert_eq!(config.playback.tick_interval(), Duration::from_millis(500));
    assert_eq!(config.navigation.redirect_target, "/login");
    config.validate().unwrap();
}

#[test]
fn partial_file_keeps_defaults() {
    let file = write_config("[playback]\nvolume = 10\n");

    let config = PlayerConfig::load_from(Some(file.path()), env(&[])).unwrap();

    assert_eq!(config.playback.volume, 10);
    assert_eq!(config.playback.tick_interval_ms, 1000);
    assert_eq!(config.cache.base_url, "http://localhost:9999");
    assert_eq!(config.navigation.redirect_target, "/");
}

#[test]
fn environment_overrides_file() {
    let file = write_config("[playback]\nvolume = 10\n");

    let config = PlayerConfig::load_from(
        Some(file.path()),
        env(&[
            ("SPINDLE_PLAYBACK__VOLUME", "70"),
            ("SPINDLE_CACHE__BASE_URL", "http://cache.local:9000"),
        ]),
    )
    .unwrap();

    assert_eq!(config.playback.volume, 70);
    assert_eq!(config.cache.base_url, "http://cache.local:9000");
}

#[test]
fn missing_explicit_file_is_an_error() {
    let result = PlayerConfig::load_from(
        Some(std::path::Path::new("/definitely/not/here/spindle.toml")),
        env(&[]),
    );

    match result {
        Err(CliError::Config(msg)) => assert!(msg.contains("not found")),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn invalid_values_fail_validation() {
    let file = write_config("[catalog]\napi_base_url = \"api.example.com\"\n");

    let config = PlayerConfig::load_from(Some(file.path()), env(&[])).unwrap();

    assert!(config.validate().is_err());
}
