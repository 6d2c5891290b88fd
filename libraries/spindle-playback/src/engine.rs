//! Audio engine boundary
//!
//! The engine is an external capability: it loads one source at a time and
//! reports `started` / `ended` through the [`EngineSink`] it was subscribed
//! with. Each sink carries the controller's load generation, so a
//! notification from a replaced instance can be recognised and dropped.

use crate::error::EngineError;
use crate::types::SourceRef;
use std::time::Duration;
use tokio::sync::mpsc;

/// Handle for one engine subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Kind of engine notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEventKind {
    /// Playback (re)started
    Started,

    /// The loaded track played to its end
    Ended,
}

/// Notification delivered to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineNotification {
    /// Load generation of the subscription that produced it
    pub generation: u64,
    pub kind: EngineEventKind,
}

/// Sending half handed to [`AudioEngine::subscribe`]
#[derive(Debug, Clone)]
pub struct EngineSink {
    generation: u64,
    tx: mpsc::UnboundedSender<EngineNotification>,
}

impl EngineSink {
    pub fn new(generation: u64, tx: mpsc::UnboundedSender<EngineNotification>) -> Self {
        Self { generation, tx }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Report that playback started or resumed
    pub fn started(&self) {
        self.send(EngineEventKind::Started);
    }

    /// Report that the track reached its end
    pub fn ended(&self) {
        self.send(EngineEventKind::Ended);
    }

    fn send(&self, kind: EngineEventKind) {
        // A closed channel means the session is gone; nothing left to notify
        let _ = self.tx.send(EngineNotification {
            generation: self.generation,
            kind,
        });
    }
}

/// Audio playback engine
///
/// Implement this for your platform. The controller is the only caller and
/// keeps at most one source loaded at a time.
pub trait AudioEngine {
    /// Load a source, replacing anything loaded before
    fn load(&mut self, source: &SourceRef) -> Result<(), EngineError>;

    /// Start or resume playback of the loaded source
    fn play(&mut self) -> Result<(), EngineError>;

    fn pause(&mut self);

    /// Stop and release the loaded source
    fn stop(&mut self);

    fn seek(&mut self, position: Duration);

    /// Set output gain (0.0 - 1.0)
    fn set_volume(&mut self, gain: f32);

    /// Duration of the loaded source, if known
    fn duration(&self) -> Option<Duration>;

    fn is_playing(&self) -> bool;

    /// Route `started` / `ended` notifications to `sink`
    fn subscribe(&mut self, sink: EngineSink) -> SubscriptionId;

    fn unsubscribe(&mut self, id: SubscriptionId);
}
