//! Playback controller - core orchestration
//!
//! Owns the song list, the current selection, play/pause state, elapsed time
//! and loop mode, and is the single owner of the audio engine.
//!
//! Two counters keep asynchronous inputs honest:
//! - `generation` is bumped on every load (restarts included). Engine
//!   notifications carry the generation they were subscribed under; anything
//!   older than the current one is ignored.
//! - the tick `epoch` identifies the currently open elapsed-time ticker. A
//!   tick for any other epoch is dropped, so a timer left over from a paused
//!   or replaced track cannot move the clock of the next one.

use crate::{
    engine::{AudioEngine, EngineEventKind, EngineNotification, EngineSink, SubscriptionId},
    error::{EngineError, PlaybackError, Result},
    events::PlaybackEvent,
    shuffle,
    types::{Direction, LoopMode, PlaybackConfig, PlaybackState},
    volume::Volume,
};
use spindle_core::{Song, SongId};
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Central playback state machine
///
/// All methods are synchronous; the owner feeds in user actions, engine
/// notifications and ticks one at a time and drains [`PlaybackEvent`]s
/// afterwards.
pub struct PlaybackController<E: AudioEngine> {
    engine: E,
    notifier: mpsc::UnboundedSender<EngineNotification>,
    config: PlaybackConfig,

    // Song list (replaced wholesale on catalog arrival)
    songs: Vec<Song>,

    // Every id cached so far; the flag never goes back to false
    cached: HashSet<SongId>,

    // Session state; `current` is an id, resolved against `songs` on use
    current: Option<SongId>,
    state: PlaybackState,
    elapsed: Duration,
    loop_mode: LoopMode,
    volume: Volume,

    // Engine instance bookkeeping
    generation: u64,
    loaded: bool,
    subscription: Option<SubscriptionId>,

    // Elapsed-time ticker
    tick_epoch: u64,
    ticking: Option<u64>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<E: AudioEngine> PlaybackController<E> {
    /// Create a controller driving `engine`
    ///
    /// `notifier` receives every engine notification; feed them back through
    /// [`PlaybackController::on_engine_event`].
    pub fn new(
        mut engine: E,
        config: PlaybackConfig,
        notifier: mpsc::UnboundedSender<EngineNotification>,
    ) -> Self {
        let volume = Volume::new(config.volume);
        engine.set_volume(volume.gain());

        Self {
            engine,
            notifier,
            config,
            songs: Vec::new(),
            cached: HashSet::new(),
            current: None,
            state: PlaybackState::Idle,
            elapsed: Duration::ZERO,
            loop_mode: LoopMode::Off,
            volume,
            generation: 0,
            loaded: false,
            subscription: None,
            tick_epoch: 0,
            ticking: None,
            pending_events: Vec::new(),
        }
    }

    // ===== Read access =====

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn song(&self, id: &SongId) -> Option<&Song> {
        self.songs.iter().find(|song| &song.id == id)
    }

    pub fn current_song_id(&self) -> Option<&SongId> {
        self.current.as_ref()
    }

    /// Current song, if its id still resolves in the song list
    pub fn current_song(&self) -> Option<&Song> {
        self.current.as_ref().and_then(|id| self.song(id))
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub fn is_repeat(&self) -> bool {
        self.loop_mode.is_repeat()
    }

    pub fn is_shuffle(&self) -> bool {
        self.loop_mode.is_shuffle()
    }

    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Engine-reported duration of the loaded song
    pub fn duration(&self) -> Option<Duration> {
        if self.loaded {
            self.engine.duration()
        } else {
            None
        }
    }

    /// Load generation of the live engine instance
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Epoch of the open ticker, `None` while not ticking
    pub fn ticker_epoch(&self) -> Option<u64> {
        self.ticking
    }

    /// Ids of playable (cached) songs, in list order
    pub fn playable_ids(&self) -> Vec<SongId> {
        self.songs
            .iter()
            .filter(|song| song.is_cached())
            .map(|song| song.id.clone())
            .collect()
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Song list =====

    /// Replace the song list wholesale
    ///
    /// A song cached at any point in this session stays cached. The
    /// current selection is kept as an id; if it no longer resolves the view
    /// shows nothing and `advance` starts from the first playable song.
    pub fn replace_songs(&mut self, mut songs: Vec<Song>) {
        for song in &mut songs {
            if song.is_cached() {
                self.cached.insert(song.id.clone());
            } else if self.cached.contains(&song.id) {
                song.mark_cached();
            }
        }

        info!(count = songs.len(), "Song list replaced");
        self.songs = songs;

        if let Some(id) = &self.current {
            if self.song(id).is_none() {
                debug!(song_id = %id, "Current song no longer in list");
            }
        }
    }

    /// Mark one song as cached; returns `true` if it changed
    pub fn mark_cached(&mut self, id: &SongId) -> bool {
        self.cached.insert(id.clone());
        match self.songs.iter_mut().find(|song| &song.id == id) {
            Some(song) => song.mark_cached(),
            None => false,
        }
    }

    // ===== Transport =====

    /// Select a song
    ///
    /// Re-selecting the current song toggles pause; any other song starts
    /// from zero. Songs that are not cached yet cannot be selected.
    pub fn select_song(&mut self, id: &SongId) -> Result<()> {
        let song = self
            .song(id)
            .ok_or_else(|| PlaybackError::SongNotFound(id.clone()))?;
        if !song.is_cached() {
            return Err(PlaybackError::SongNotCached(id.clone()));
        }

        if self.current.as_ref() == Some(id) {
            match self.state {
                PlaybackState::Playing => {
                    self.pause();
                    return Ok(());
                }
                PlaybackState::Paused => return self.resume(),
                PlaybackState::Stalled | PlaybackState::Idle => {}
            }
        }

        self.start_track(id.clone())
    }

    /// Toggle play/pause of the current song
    pub fn play_pause(&mut self) -> Result<()> {
        if self.current.is_none() {
            debug!("play/pause with nothing selected");
            return Ok(());
        }

        if self.is_playing() {
            self.pause();
            Ok(())
        } else {
            self.resume()
        }
    }

    /// Move to the neighbouring playable song
    ///
    /// Forward past the last playable song wraps to the first one. Previous
    /// on the first playable song does nothing. If the current song is not
    /// among the playable ones, both directions pick the first playable song.
    pub fn advance(&mut self, direction: Direction) -> Result<()> {
        let playable = self.playable_ids();
        let Some(first) = playable.first() else {
            debug!(?direction, "Nothing playable to advance to");
            return Ok(());
        };

        let position = self
            .current
            .as_ref()
            .and_then(|current| playable.iter().position(|id| id == current));

        let target = match (position, direction) {
            (None, _) => first.clone(),
            (Some(index), Direction::Forward) => {
                playable.get(index + 1).unwrap_or(first).clone()
            }
            (Some(0), Direction::Previous) => return Ok(()),
            (Some(index), Direction::Previous) => playable[index - 1].clone(),
        };

        self.start_track(target)
    }

    /// Handle the current track reaching its end
    pub fn on_track_ended(&mut self) -> Result<()> {
        let finished = self.current.clone();
        if let Some(id) = &finished {
            info!(song_id = %id, mode = ?self.loop_mode, "Track ended");
            self.pending_events
                .push(PlaybackEvent::TrackFinished { song_id: id.clone() });
        }
        self.close_ticker();

        match self.loop_mode {
            LoopMode::Shuffle => {
                let playable = self.playable_ids();
                match shuffle::pick_next(&playable, finished.as_ref()) {
                    Some(target) => self.start_track(target),
                    None => {
                        self.stop_engine();
                        self.set_state(PlaybackState::Paused);
                        Ok(())
                    }
                }
            }
            LoopMode::Repeat => match finished {
                Some(id) if self.song(&id).is_some_and(Song::is_cached) => {
                    self.start_track(id)
                }
                _ => self.advance(Direction::Forward),
            },
            LoopMode::Off => self.advance(Direction::Forward),
        }
    }

    /// Seek within the current song
    ///
    /// Ignored with nothing selected; clamped to the engine-reported duration.
    pub fn seek(&mut self, position: Duration) {
        if self.current.is_none() {
            return;
        }

        let position = match self.duration() {
            Some(duration) => position.min(duration),
            None => position,
        };

        self.elapsed = position;
        if self.loaded {
            self.engine.seek(position);
        }
        self.push_position();
    }

    /// Set volume (0-100, clamped)
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.engine.set_volume(self.volume.gain());
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
        });
    }

    /// Toggle repeat (clears shuffle)
    pub fn toggle_repeat(&mut self) {
        self.set_loop_mode(self.loop_mode.toggle_repeat());
    }

    /// Toggle shuffle (clears repeat)
    pub fn toggle_shuffle(&mut self) {
        self.set_loop_mode(self.loop_mode.toggle_shuffle());
    }

    // ===== Engine and timer inputs =====

    /// Handle a notification from the engine
    pub fn on_engine_event(&mut self, notification: EngineNotification) -> Result<()> {
        if notification.generation != self.generation || !self.loaded {
            debug!(
                generation = notification.generation,
                current = self.generation,
                kind = ?notification.kind,
                "Ignoring stale engine notification"
            );
            return Ok(());
        }

        match notification.kind {
            EngineEventKind::Started => {
                if self.is_playing() && self.ticking.is_none() {
                    self.tick_epoch += 1;
                    self.ticking = Some(self.tick_epoch);
                }
                Ok(())
            }
            EngineEventKind::Ended => self.on_track_ended(),
        }
    }

    /// Advance elapsed time by one tick period
    ///
    /// Returns `false` (and changes nothing) for a tick from a closed epoch.
    pub fn on_tick(&mut self, epoch: u64) -> bool {
        if self.ticking != Some(epoch) || !self.is_playing() {
            return false;
        }

        self.elapsed += self.config.tick_interval();
        self.push_position();
        true
    }

    /// Stop the engine and release everything tied to it
    ///
    /// Safe to call more than once; also runs on drop.
    pub fn teardown(&mut self) {
        if self.loaded {
            info!(song_id = ?self.current, "Tearing down playback");
        }
        self.stop_engine();
        self.set_state(PlaybackState::Idle);
    }

    // ===== Internals =====

    fn start_track(&mut self, id: SongId) -> Result<()> {
        let Some(song) = self.song(&id) else {
            return Err(PlaybackError::SongNotFound(id));
        };
        let source = self.config.source_for(song);

        self.stop_engine();

        let previous = self.current.replace(id.clone());
        self.elapsed = Duration::ZERO;
        self.generation += 1;

        info!(song_id = %id, generation = self.generation, "Loading track");
        self.pending_events.push(PlaybackEvent::SongChanged {
            song_id: id.clone(),
            previous_song_id: previous,
        });

        let loaded = match &source {
            Some(source) => self.engine.load(source),
            None => Err(EngineError::new(format!("song id {id} cannot name a cache file"))),
        };
        if let Err(e) = loaded {
            self.stall(e);
            return Ok(());
        }
        self.loaded = true;

        let sink = EngineSink::new(self.generation, self.notifier.clone());
        self.subscription = Some(self.engine.subscribe(sink));
        self.engine.set_volume(self.volume.gain());

        if let Err(e) = self.engine.play() {
            self.stall(e);
            return Ok(());
        }

        self.set_state(PlaybackState::Playing);
        self.push_position();
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        let Some(id) = self.current.clone() else {
            return Ok(());
        };

        if !self.loaded {
            // Stalled or torn down: load again from zero
            return self.start_track(id);
        }

        if let Err(e) = self.engine.play() {
            self.stall(e);
            return Ok(());
        }
        self.set_state(PlaybackState::Playing);
        Ok(())
    }

    fn pause(&mut self) {
        if self.loaded {
            self.engine.pause();
        }
        self.close_ticker();
        self.set_state(PlaybackState::Paused);
    }

    fn stall(&mut self, error: EngineError) {
        let song_id = self.current.clone();
        warn!(song_id = ?song_id, error = %error, "Playback stalled");

        self.stop_engine();
        self.set_state(PlaybackState::Stalled);

        if let Some(song_id) = song_id {
            self.pending_events.push(PlaybackEvent::Stalled {
                song_id,
                message: error.to_string(),
            });
        }
    }

    fn stop_engine(&mut self) {
        self.close_ticker();
        if let Some(subscription) = self.subscription.take() {
            self.engine.unsubscribe(subscription);
        }
        if self.loaded {
            self.engine.stop();
            self.loaded = false;
        }
    }

    fn close_ticker(&mut self) {
        self.ticking = None;
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.pending_events
                .push(PlaybackEvent::StateChanged { state });
        }
    }

    fn set_loop_mode(&mut self, mode: LoopMode) {
        self.loop_mode = mode;
        info!(mode = ?mode, "Loop mode changed");
        self.pending_events.push(PlaybackEvent::ModeChanged {
            repeat: mode.is_repeat(),
            shuffle: mode.is_shuffle(),
        });
    }

    fn push_position(&mut self) {
        self.pending_events.push(PlaybackEvent::PositionUpdate {
            position_ms: self.elapsed.as_millis() as u64,
            duration_ms: self.duration().map(|d| d.as_millis() as u64),
        });
    }
}

impl<E: AudioEngine> Drop for PlaybackController<E> {
    fn drop(&mut self) {
        self.teardown();
    }
}
