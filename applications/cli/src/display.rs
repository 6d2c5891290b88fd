//! Terminal rendering of session updates

use spindle_core::{Song, SongId};
use spindle_playback::{
    format_clock, view, PlaybackEvent, PlaybackState, PlayerView, SessionUpdate,
};
use std::time::Duration;

/// Turns session updates into printable lines
#[derive(Debug, Default)]
pub struct Display {
    playlist_name: String,
    songs: Vec<Song>,
    current: Option<SongId>,
    view: Option<PlayerView>,
}

impl Display {
    pub fn new(playlist_name: impl Into<String>) -> Self {
        Self {
            playlist_name: playlist_name.into(),
            ..Self::default()
        }
    }

    /// Lines to print for one update (often none)
    pub fn apply(&mut self, update: &SessionUpdate) -> Vec<String> {
        match update {
            SessionUpdate::SongsChanged(songs) => self.songs_changed(songs),
            SessionUpdate::Playback(event) => self.playback_event(event),
            SessionUpdate::View(view) => {
                self.view = Some(view.clone());
                Vec::new()
            }
            SessionUpdate::Rejected { reason } => vec![reason.clone()],
            SessionUpdate::Redirect(redirect) => vec![format!(
                "Playlist could not be loaded (is the token still valid?); returning to {}",
                redirect.target
            )],
        }
    }

    /// The playlist, one song per line, current song marked
    pub fn song_list(&self) -> Vec<String> {
        let mut lines = vec![format!("== {} ==", self.title())];
        lines.extend(self.songs.iter().enumerate().map(|(index, song)| {
            let marker = if Some(&song.id) == self.current.as_ref() {
                '>'
            } else {
                ' '
            };
            let status = if song.is_cached() { "" } else { "  (downloading)" };
            format!(
                "{marker} {:>3}. {} - {} [{}] {}{status}",
                index + 1,
                song.title,
                song.artist,
                format_clock(song.duration),
                song.id,
            )
        }));
        lines
    }

    /// One-line summary of the player
    pub fn status(&self) -> String {
        let Some(view) = &self.view else {
            return "Nothing playing".to_string();
        };
        let Some(now) = &view.now_playing else {
            return "Nothing playing".to_string();
        };

        let state = match view.state {
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
            PlaybackState::Stalled => "stalled",
            PlaybackState::Idle => "stopped",
        };
        let mut line = format!(
            "{} - {}  {} / {}  [{state}] vol {}",
            now.title,
            now.artist,
            format_clock(Duration::from_secs(view.slider.position_secs)),
            format_clock(Duration::from_secs(view.slider.length_secs)),
            view.volume,
        );
        if view.repeat {
            line.push_str(" repeat");
        }
        if view.shuffle {
            line.push_str(" shuffle");
        }
        line
    }

    fn title(&self) -> String {
        view::window_title(&self.songs, self.current.as_ref(), &self.playlist_name)
    }

    fn songs_changed(&mut self, songs: &[Song]) -> Vec<String> {
        let first = self.songs.is_empty();
        let newly_cached: Vec<String> = songs
            .iter()
            .filter(|song| {
                song.is_cached()
                    && self
                        .songs
                        .iter()
                        .any(|old| old.id == song.id && !old.is_cached())
            })
            .map(|song| format!("Ready: {} - {}", song.title, song.artist))
            .collect();

        self.songs = songs.to_vec();

        if first {
            self.song_list()
        } else {
            newly_cached
        }
    }

    fn playback_event(&mut self, event: &PlaybackEvent) -> Vec<String> {
        match event {
            PlaybackEvent::SongChanged { song_id, .. } => {
                self.current = Some(song_id.clone());
                match view::now_playing(&self.songs, Some(song_id)) {
                    Some(now) => vec![format!("> {} - {}", now.title, now.artist)],
                    None => Vec::new(),
                }
            }
            PlaybackEvent::StateChanged { state } => match state {
                PlaybackState::Paused => vec!["Paused".to_string()],
                _ => Vec::new(),
            },
            PlaybackEvent::ModeChanged { repeat, shuffle } => vec![format!(
                "Repeat {}, shuffle {}",
                on_off(*repeat),
                on_off(*shuffle)
            )],
            PlaybackEvent::VolumeChanged { level } => vec![format!("Volume {level}")],
            PlaybackEvent::Stalled { song_id, .. } => {
                let name = view::now_playing(&self.songs, Some(song_id))
                    .map_or_else(|| song_id.to_string(), |now| now.title);
                vec![format!("Could not play {name}; press p to retry")]
            }
            PlaybackEvent::TrackFinished { .. } | PlaybackEvent::PositionUpdate { .. } => {
                Vec::new()
            }
        }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
