//! Display values derived from controller state
//!
//! Everything here is a pure lookup. A current id that no longer resolves
//! simply yields nothing.

use crate::{controller::PlaybackController, engine::AudioEngine, types::PlaybackState};
use serde::Serialize;
use spindle_core::{Song, SongId};
use std::time::Duration;

/// Cover, title and artist of the current song
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub cover_url: Option<String>,
}

impl NowPlaying {
    fn from_song(song: &Song) -> Self {
        Self {
            title: song.title.clone(),
            artist: song.artist.clone(),
            cover_url: song.cover_url.clone(),
        }
    }
}

/// Slider position and range, in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SliderPosition {
    pub position_secs: u64,
    pub length_secs: u64,
}

impl SliderPosition {
    /// Position as a fraction of the length (0.0 when the length is unknown)
    pub fn fraction(&self) -> f64 {
        if self.length_secs == 0 {
            return 0.0;
        }
        (self.position_secs as f64 / self.length_secs as f64).min(1.0)
    }
}

/// Display bundle for the current song
pub fn now_playing(songs: &[Song], current: Option<&SongId>) -> Option<NowPlaying> {
    let current = current?;
    songs
        .iter()
        .find(|song| &song.id == current)
        .map(NowPlaying::from_song)
}

/// Slider values from elapsed time and the engine-reported duration
pub fn slider(elapsed: Duration, duration: Option<Duration>) -> SliderPosition {
    SliderPosition {
        position_secs: elapsed.as_secs(),
        length_secs: duration.map_or(0, |d| d.as_secs()),
    }
}

/// Id of the row to highlight in the song list
pub fn row_highlight(current: Option<&SongId>) -> Option<&str> {
    current.map(SongId::as_str)
}

/// Window title: the current song's title, else the playlist name
pub fn window_title(songs: &[Song], current: Option<&SongId>, playlist_name: &str) -> String {
    now_playing(songs, current).map_or_else(|| playlist_name.to_string(), |np| np.title)
}

/// Render a duration as `m:ss`
pub fn format_clock(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Complete snapshot of what the player shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub now_playing: Option<NowPlaying>,
    pub highlight: Option<SongId>,
    pub slider: SliderPosition,
    pub state: PlaybackState,
    pub repeat: bool,
    pub shuffle: bool,
    pub volume: u8,
}

impl PlayerView {
    pub fn project<E: AudioEngine>(controller: &PlaybackController<E>) -> Self {
        let current = controller.current_song_id();
        Self {
            now_playing: now_playing(controller.songs(), current),
            highlight: row_highlight(current).map(SongId::from),
            slider: slider(controller.elapsed(), controller.duration()),
            state: controller.state(),
            repeat: controller.is_repeat(),
            shuffle: controller.is_shuffle(),
            volume: controller.volume(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn songs() -> Vec<Song> {
        vec![
            Song::new("a", "Alpha")
                .with_artist("Ann")
                .with_cover_url("https://img/a.jpg"),
            Song::new("b", "Beta"),
        ]
    }

    #[test]
    fn now_playing_resolves_by_id() {
        let np = now_playing(&songs(), Some(&SongId::new("a"))).unwrap();
        assert_eq!(np.title, "Alpha");
        assert_eq!(np.artist, "Ann");
        assert_eq!(np.cover_url.as_deref(), Some("https://img/a.jpg"));
    }

    #[test]
    fn vanished_id_shows_nothing() {
        assert!(now_playing(&songs(), Some(&SongId::new("gone"))).is_none());
        assert!(now_playing(&songs(), None).is_none());
    }

    #[test]
    fn slider_without_duration() {
        let s = slider(Duration::from_secs(12), None);
        assert_eq!(s.position_secs, 12);
        assert_eq!(s.length_secs, 0);
        assert_eq!(s.fraction(), 0.0);
    }

    #[test]
    fn slider_fraction_is_capped() {
        let s = slider(Duration::from_secs(30), Some(Duration::from_secs(120)));
        assert!((s.fraction() - 0.25).abs() < f64::EPSILON);

        let s = slider(Duration::from_secs(200), Some(Duration::from_secs(120)));
        assert_eq!(s.fraction(), 1.0);
    }

    #[test]
    fn highlight_uses_trimmed_id() {
        let id = SongId::new("  b ");
        assert_eq!(row_highlight(Some(&id)), Some("b"));
    }

    #[test]
    fn title_falls_back_to_playlist() {
        let songs = songs();
        assert_eq!(window_title(&songs, Some(&SongId::new("b")), "Mix"), "Beta");
        assert_eq!(window_title(&songs, None, "Mix"), "Mix");
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(Duration::from_secs(0)), "0:00");
        assert_eq!(format_clock(Duration::from_secs(65)), "1:05");
        assert_eq!(format_clock(Duration::from_secs(3600)), "60:00");
    }
}
