//! Spindle - Playback Orchestration
//!
//! Playback and background-download orchestration for one open playlist.
//!
//! This crate provides:
//! - The playback controller (selection, play/pause, advance, end-of-track
//!   policy, seek, volume, repeat/shuffle)
//! - The download coordinator (sequential, at most once per song per load)
//! - Transport actions as a closed enum with exhaustive dispatch
//! - Pure view projection for display
//! - An async session loop tying it all to tokio channels
//!
//! # Architecture
//!
//! `spindle-playback` does not decode audio. The platform supplies an
//! [`AudioEngine`]; the controller is its only caller and keeps at most one
//! source loaded. Engine notifications carry the load generation they were
//! subscribed under, so notifications from a replaced instance are ignored.
//!
//! # Example: Driving the controller
//!
//! ```rust
//! use spindle_core::{Song, SongId};
//! use spindle_playback::{
//!     AudioEngine, EngineError, EngineSink, PlaybackConfig, PlaybackController,
//!     PlaybackState, SourceRef, SubscriptionId,
//! };
//! use std::time::Duration;
//!
//! #[derive(Default)]
//! struct SilentEngine;
//!
//! impl AudioEngine for SilentEngine {
//!     fn load(&mut self, _source: &SourceRef) -> Result<(), EngineError> { Ok(()) }
//!     fn play(&mut self) -> Result<(), EngineError> { Ok(()) }
//!     fn pause(&mut self) {}
//!     fn stop(&mut self) {}
//!     fn seek(&mut self, _position: Duration) {}
//!     fn set_volume(&mut self, _gain: f32) {}
//!     fn duration(&self) -> Option<Duration> { None }
//!     fn is_playing(&self) -> bool { false }
//!     fn subscribe(&mut self, _sink: EngineSink) -> SubscriptionId { SubscriptionId(0) }
//!     fn unsubscribe(&mut self, _id: SubscriptionId) {}
//! }
//!
//! let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut controller = PlaybackController::new(SilentEngine, PlaybackConfig::default(), tx);
//!
//! controller.replace_songs(vec![
//!     Song::new("a", "First").with_cached(true),
//!     Song::new("b", "Second"),
//! ]);
//!
//! controller.select_song(&SongId::new("a")).unwrap();
//! assert_eq!(controller.state(), PlaybackState::Playing);
//!
//! // Not downloaded yet
//! assert!(controller.select_song(&SongId::new("b")).is_err());
//!
//! // Same song again pauses
//! controller.select_song(&SongId::new("a")).unwrap();
//! assert_eq!(controller.state(), PlaybackState::Paused);
//! ```

pub mod controller;
pub mod downloads;
pub mod engine;
mod error;
pub mod events;
pub mod session;
mod shuffle;
pub mod transport;
pub mod types;
pub mod view;
mod volume;

// Public exports
pub use controller::PlaybackController;
pub use downloads::{
    download_all, DownloadCoordinator, DownloadOutcome, DownloadPlan, DownloadResult,
};
pub use engine::{AudioEngine, EngineEventKind, EngineNotification, EngineSink, SubscriptionId};
pub use error::{EngineError, PlaybackError, Result};
pub use events::PlaybackEvent;
pub use session::{
    load_catalog, PlaybackSession, Redirect, SessionCommand, SessionEnd, SessionHandle,
    SessionSettings, SessionSources, SessionUpdate, DEFAULT_REDIRECT_TARGET,
};
pub use shuffle::{pick_next, pick_next_with};
pub use transport::{dispatch, ParseActionError, TransportAction};
pub use types::{Direction, LoopMode, PlaybackConfig, PlaybackState, SourceRef};
pub use view::{format_clock, NowPlaying, PlayerView, SliderPosition};
pub use volume::Volume;
