//! Silent, clock-driven audio engine
//!
//! Plays nothing; it keeps a position clock and reports `ended` once the
//! track's length has elapsed, which is all the session needs to run a
//! playlist in a terminal.

use spindle_playback::{AudioEngine, EngineError, EngineSink, SourceRef, SubscriptionId};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Length assumed for tracks without a catalog duration
pub const DEFAULT_TRACK_LENGTH: Duration = Duration::from_secs(180);

pub struct ClockEngine {
    check_files: bool,
    loaded: Option<SourceRef>,
    length: Duration,
    position: Duration,
    resumed_at: Option<Instant>,
    gain: f32,
    sink: Option<(SubscriptionId, EngineSink)>,
    next_subscription: u64,
    end_timer: Option<AbortHandle>,
}

impl ClockEngine {
    /// With `check_files`, loading fails unless the cached file exists
    pub fn new(check_files: bool) -> Self {
        Self {
            check_files,
            loaded: None,
            length: DEFAULT_TRACK_LENGTH,
            position: Duration::ZERO,
            resumed_at: None,
            gain: 1.0,
            sink: None,
            next_subscription: 0,
            end_timer: None,
        }
    }

    /// Current playback position
    pub fn position(&self) -> Duration {
        let running = self
            .resumed_at
            .map_or(Duration::ZERO, |resumed| resumed.elapsed());
        (self.position + running).min(self.length)
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    fn arm_end_timer(&mut self) {
        self.cancel_end_timer();

        let Some((_, sink)) = self.sink.clone() else {
            return;
        };
        let Ok(runtime) = Handle::try_current() else {
            warn!("No async runtime; end of track will not be reported");
            return;
        };

        let remaining = self.length.saturating_sub(self.position);
        let task = runtime.spawn(async move {
            tokio::time::sleep(remaining).await;
            sink.ended();
        });
        self.end_timer = Some(task.abort_handle());
    }

    fn cancel_end_timer(&mut self) {
        if let Some(timer) = self.end_timer.take() {
            timer.abort();
        }
    }

    fn freeze_clock(&mut self) {
        self.position = self.position();
        self.resumed_at = None;
    }
}

impl AudioEngine for ClockEngine {
    fn load(&mut self, source: &SourceRef) -> Result<(), EngineError> {
        self.stop();

        if self.check_files && !source.path.is_file() {
            return Err(EngineError::new(format!(
                "audio file missing: {}",
                source.path.display()
            )));
        }

        debug!(song_id = %source.song_id, path = %source.path.display(), "Loaded");
        self.length = source.duration_hint.unwrap_or(DEFAULT_TRACK_LENGTH);
        self.loaded = Some(source.clone());
        Ok(())
    }

    fn play(&mut self) -> Result<(), EngineError> {
        if self.loaded.is_none() {
            return Err(EngineError::new("nothing loaded"));
        }

        if self.resumed_at.is_none() {
            self.resumed_at = Some(Instant::now());
            self.arm_end_timer();
        }

        if let Some((_, sink)) = &self.sink {
            sink.started();
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.freeze_clock();
        self.cancel_end_timer();
    }

    fn stop(&mut self) {
        self.cancel_end_timer();
        self.loaded = None;
        self.position = Duration::ZERO;
        self.resumed_at = None;
    }

    fn seek(&mut self, position: Duration) {
        self.position = position.min(self.length);
        if self.resumed_at.is_some() {
            self.resumed_at = Some(Instant::now());
            self.arm_end_timer();
        }
    }

    fn set_volume(&mut self, gain: f32) {
        self.gain = gain.clamp(0.0, 1.0);
    }

    fn duration(&self) -> Option<Duration> {
        self.loaded.as_ref().map(|_| self.length)
    }

    fn is_playing(&self) -> bool {
        self.resumed_at.is_some()
    }

    fn subscribe(&mut self, sink: EngineSink) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.sink = Some((id, sink));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        if matches!(&self.sink, Some((current, _)) if *current == id) {
            self.sink = None;
            self.cancel_end_timer();
        }
    }
}

impl Drop for ClockEngine {
    fn drop(&mut self) {
        self.cancel_end_timer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spindle_core::SongId;
    use spindle_playback::{EngineEventKind, EngineNotification};
    use std::path::PathBuf;
    use tokio::sync::mpsc;

    fn source(secs: u64) -> SourceRef {
        SourceRef {
            song_id: SongId::new("a"),
            path: PathBuf::from("songs/a.mp3"),
            duration_hint: Some(Duration::from_secs(secs)),
        }
    }

    fn subscribed(engine: &mut ClockEngine) -> mpsc::UnboundedReceiver<EngineNotification> {
        let (tx, rx) = mpsc::unbounded_channel();
        engine.subscribe(EngineSink::new(1, tx));
        rx
    }

    #[tokio::test(start_paused = true)]
    async fn reports_started_then_ended() {
        let mut engine = ClockEngine::new(false);
        engine.load(&source(10)).unwrap();
        let mut rx = subscribed(&mut engine);
        engine.play().unwrap();

        assert_eq!(rx.recv().await.unwrap().kind, EngineEventKind::Started);

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(engine.position(), Duration::from_secs(4));
        assert!(rx.try_recv().is_err());

        assert_eq!(rx.recv().await.unwrap().kind, EngineEventKind::Ended);
        assert_eq!(engine.position(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn pause_holds_the_clock() {
        let mut engine = ClockEngine::new(false);
        engine.load(&source(10)).unwrap();
        let mut rx = subscribed(&mut engine);
        engine.play().unwrap();
        rx.recv().await.unwrap();

        tokio::time::sleep(Duration::from_secs(3)).await;
        engine.pause();
        tokio::time::sleep(Duration::from_secs(60)).await;

        assert_eq!(engine.position(), Duration::from_secs(3));
        assert!(!engine.is_playing());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn unsubscribed_sink_hears_nothing() {
        let mut engine = ClockEngine::new(false);
        engine.load(&source(2)).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = engine.subscribe(EngineSink::new(1, tx));
        engine.unsubscribe(id);
        engine.play().unwrap();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn missing_file_fails_when_checked() {
        let mut engine = ClockEngine::new(true);
        let err = engine.load(&source(10)).unwrap_err();
        assert!(err.to_string().contains("audio file missing"));
        assert!(engine.duration().is_none());
    }

    #[test]
    fn existing_file_loads_when_checked() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.mp3");
        std::fs::write(&path, b"ID3").unwrap();

        let mut engine = ClockEngine::new(true);
        let source = SourceRef {
            path,
            ..source(42)
        };
        engine.load(&source).unwrap();
        assert_eq!(engine.duration(), Some(Duration::from_secs(42)));
    }
}
