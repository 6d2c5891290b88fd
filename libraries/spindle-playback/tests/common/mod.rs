//! Shared test doubles for spindle-playback integration tests

#![allow(dead_code)]

use spindle_core::{Song, SongId};
use spindle_playback::{AudioEngine, EngineError, EngineSink, SourceRef, SubscriptionId};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Everything the controller asked the engine to do
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Load(SongId),
    Play,
    Pause,
    Stop,
    Seek(Duration),
    SetVolume(f32),
    Subscribe(u64),
    Unsubscribe(SubscriptionId),
}

#[derive(Debug, Default)]
pub struct FakeEngineState {
    pub calls: Vec<EngineCall>,
    pub sink: Option<EngineSink>,
    pub loaded: Option<SongId>,
    pub playing: bool,
    pub duration: Option<Duration>,
    pub fail_load: HashSet<SongId>,
    pub fail_play: bool,
    pub next_subscription: u64,
    pub live_subscriptions: usize,
}

/// In-memory engine; clones share state so tests can inspect it
#[derive(Debug, Clone, Default)]
pub struct FakeEngine {
    pub state: Arc<Mutex<FakeEngineState>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn loads(&self) -> Vec<SongId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                EngineCall::Load(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn loaded(&self) -> Option<SongId> {
        self.state.lock().unwrap().loaded.clone()
    }

    pub fn is_playing_now(&self) -> bool {
        self.state.lock().unwrap().playing
    }

    pub fn live_subscriptions(&self) -> usize {
        self.state.lock().unwrap().live_subscriptions
    }

    pub fn fail_load(&self, id: &str) {
        self.state.lock().unwrap().fail_load.insert(SongId::new(id));
    }

    pub fn allow_load(&self, id: &str) {
        self.state.lock().unwrap().fail_load.remove(&SongId::new(id));
    }

    pub fn set_fail_play(&self, fail: bool) {
        self.state.lock().unwrap().fail_play = fail;
    }

    /// Current sink, to replay notifications by hand
    pub fn sink(&self) -> Option<EngineSink> {
        self.state.lock().unwrap().sink.clone()
    }

    /// Simulate the loaded track reaching its end
    pub fn finish_track(&self) {
        let sink = {
            let mut state = self.state.lock().unwrap();
            state.playing = false;
            state.sink.clone()
        };
        if let Some(sink) = sink {
            sink.ended();
        }
    }
}

impl AudioEngine for FakeEngine {
    fn load(&mut self, source: &SourceRef) -> Result<(), EngineError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(EngineCall::Load(source.song_id.clone()));
        if state.fail_load.contains(&source.song_id) {
            return Err(EngineError::new(format!("cannot open {}", source.path.display())));
        }
        state.loaded = Some(source.song_id.clone());
        state.duration = source.duration_hint;
        Ok(())
    }

    fn play(&mut self) -> Result<(), EngineError> {
        let sink = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(EngineCall::Play);
            if state.fail_play {
                return Err(EngineError::new("output device unavailable"));
            }
            state.playing = true;
            state.sink.clone()
        };
        if let Some(sink) = sink {
            sink.started();
        }
        Ok(())
    }

    fn pause(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.calls.push(EngineCall::Pause);
        state.playing = false;
    }

    fn stop(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.calls.push(EngineCall::Stop);
        state.playing = false;
        state.loaded = None;
        state.duration = None;
    }

    fn seek(&mut self, position: Duration) {
        self.state.lock().unwrap().calls.push(EngineCall::Seek(position));
    }

    fn set_volume(&mut self, gain: f32) {
        self.state.lock().unwrap().calls.push(EngineCall::SetVolume(gain));
    }

    fn duration(&self) -> Option<Duration> {
        self.state.lock().unwrap().duration
    }

    fn is_playing(&self) -> bool {
        self.state.lock().unwrap().playing
    }

    fn subscribe(&mut self, sink: EngineSink) -> SubscriptionId {
        let mut state = self.state.lock().unwrap();
        state.calls.push(EngineCall::Subscribe(sink.generation()));
        state.sink = Some(sink);
        state.next_subscription += 1;
        state.live_subscriptions += 1;
        SubscriptionId(state.next_subscription)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        let mut state = self.state.lock().unwrap();
        state.calls.push(EngineCall::Unsubscribe(id));
        state.sink = None;
        state.live_subscriptions = state.live_subscriptions.saturating_sub(1);
    }
}

/// Song with a known duration
pub fn song(id: &str, cached: bool) -> Song {
    Song::new(id, format!("Song {id}"))
        .with_artist(format!("Artist {id}"))
        .with_duration(Duration::from_secs(180))
        .with_cached(cached)
}

pub fn id(raw: &str) -> SongId {
    SongId::new(raw)
}
