//! Core types for playback management

use serde::{Deserialize, Serialize};
use spindle_core::{Song, SongId};
use std::path::PathBuf;
use std::time::Duration;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No song selected, or the session was torn down
    Idle,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,

    /// The engine could not load or start the current song
    Stalled,
}

/// Repeat / shuffle setting
///
/// A single enum so that repeat and shuffle can never both be on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoopMode {
    /// Advance to the next playable song when a track ends
    #[default]
    Off,

    /// Restart the same song when it ends
    Repeat,

    /// Pick a random playable song when a track ends
    Shuffle,
}

impl LoopMode {
    /// Toggle repeat, clearing shuffle
    pub fn toggle_repeat(self) -> Self {
        match self {
            LoopMode::Repeat => LoopMode::Off,
            LoopMode::Off | LoopMode::Shuffle => LoopMode::Repeat,
        }
    }

    /// Toggle shuffle, clearing repeat
    pub fn toggle_shuffle(self) -> Self {
        match self {
            LoopMode::Shuffle => LoopMode::Off,
            LoopMode::Off | LoopMode::Repeat => LoopMode::Shuffle,
        }
    }

    pub fn is_repeat(self) -> bool {
        self == LoopMode::Repeat
    }

    pub fn is_shuffle(self) -> bool {
        self == LoopMode::Shuffle
    }
}

/// Direction for `advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Previous,
}

/// What the engine is asked to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    pub song_id: SongId,

    /// Local file holding the cached audio
    pub path: PathBuf,

    /// Duration from the catalog, for engines that cannot probe the file
    pub duration_hint: Option<Duration>,
}

/// Configuration for the playback controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume (0-100, default: 100)
    #[serde(default = "default_volume")]
    pub volume: u8,

    /// Directory holding cached `<id>.mp3` files (default: "songs")
    #[serde(default = "default_songs_dir")]
    pub songs_dir: PathBuf,

    /// Elapsed-time tick period in milliseconds (default: 1000)
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

fn default_volume() -> u8 {
    100
}

fn default_songs_dir() -> PathBuf {
    PathBuf::from("songs")
}

fn default_tick_interval_ms() -> u64 {
    1000
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            songs_dir: default_songs_dir(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl PlaybackConfig {
    /// Source reference for a cached song
    ///
    /// `None` when the id cannot name a file inside `songs_dir`.
    pub fn source_for(&self, song: &Song) -> Option<SourceRef> {
        if !song.id.is_catalog_id() {
            return None;
        }

        let duration_hint = (!song.duration.is_zero()).then_some(song.duration);
        Some(SourceRef {
            song_id: song.id.clone(),
            path: self.songs_dir.join(format!("{}.mp3", song.id)),
            duration_hint,
        })
    }

    /// Tick period; a zero setting falls back to one second
    pub fn tick_interval(&self) -> Duration {
        if self.tick_interval_ms == 0 {
            Duration::from_secs(1)
        } else {
            Duration::from_millis(self.tick_interval_ms)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_and_shuffle_exclusive() {
        let mode = LoopMode::Off.toggle_repeat();
        assert!(mode.is_repeat());

        let mode = mode.toggle_shuffle();
        assert!(mode.is_shuffle());
        assert!(!mode.is_repeat());

        let mode = mode.toggle_repeat();
        assert!(mode.is_repeat());
        assert!(!mode.is_shuffle());

        assert_eq!(mode.toggle_repeat(), LoopMode::Off);
    }

    #[test]
    fn source_path_uses_trimmed_id() {
        let config = PlaybackConfig {
            songs_dir: PathBuf::from("/srv/songs"),
            ..Default::default()
        };
        let song = Song::new(" abc ", "Title").with_duration(Duration::from_secs(90));

        let source = config.source_for(&song).unwrap();

        assert_eq!(source.path, PathBuf::from("/srv/songs/abc.mp3"));
        assert_eq!(source.duration_hint, Some(Duration::from_secs(90)));
    }

    #[test]
    fn zero_duration_has_no_hint() {
        let source = PlaybackConfig::default().source_for(&Song::new("a", "A"));
        assert!(source.unwrap().duration_hint.is_none());
    }

    #[test]
    fn ids_that_escape_the_songs_dir_have_no_source() {
        let config = PlaybackConfig::default();
        assert!(config.source_for(&Song::new("../../etc/passwd", "X")).is_none());
        assert!(config.source_for(&Song::new("a/b", "X")).is_none());
    }

    #[test]
    fn config_defaults() {
        let config: PlaybackConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.volume, 100);
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
    }
}
