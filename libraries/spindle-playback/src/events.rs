//! Playback Events
//!
//! Event-based communication for UI synchronization. The controller queues
//! events as state changes and the owner drains them after each input:
//! - State changes (play/pause/stall/idle)
//! - Song changes (selection, advance, forced restart)
//! - Position updates (each tick, each seek)

use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};
use spindle_core::SongId;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// A song was loaded into the engine
    ///
    /// Emitted for restarts too, with `previous_song_id` equal to `song_id`.
    SongChanged {
        song_id: SongId,
        previous_song_id: Option<SongId>,
    },

    /// Track finished playing naturally (reached end)
    TrackFinished { song_id: SongId },

    /// Position update
    PositionUpdate {
        /// Elapsed playback time
        position_ms: u64,
        /// Engine-reported duration, if known
        duration_ms: Option<u64>,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
    },

    /// Repeat / shuffle changed
    ModeChanged { repeat: bool, shuffle: bool },

    /// The engine could not load or start a song
    Stalled { song_id: SongId, message: String },
}
