//! Transport controls
//!
//! The five player buttons as one closed set of actions, each mapped to a
//! single controller operation.

use crate::{controller::PlaybackController, engine::AudioEngine, error::Result, types::Direction};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A transport button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportAction {
    PlayPause,
    Repeat,
    Shuffle,
    Forward,
    Previous,
}

impl TransportAction {
    /// Every action, in on-screen order
    pub const ALL: [TransportAction; 5] = [
        TransportAction::Shuffle,
        TransportAction::Previous,
        TransportAction::PlayPause,
        TransportAction::Forward,
        TransportAction::Repeat,
    ];

    /// Canonical command name
    pub fn name(self) -> &'static str {
        match self {
            TransportAction::PlayPause => "play-pause",
            TransportAction::Repeat => "repeat",
            TransportAction::Shuffle => "shuffle",
            TransportAction::Forward => "forward",
            TransportAction::Previous => "previous",
        }
    }
}

impl fmt::Display for TransportAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown transport action: {0}")]
pub struct ParseActionError(pub String);

impl FromStr for TransportAction {
    type Err = ParseActionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "play-pause" | "play" | "pause" | "p" => Ok(TransportAction::PlayPause),
            "repeat" | "r" => Ok(TransportAction::Repeat),
            "shuffle" | "s" => Ok(TransportAction::Shuffle),
            "forward" | "next" | "n" => Ok(TransportAction::Forward),
            "previous" | "prev" | "b" => Ok(TransportAction::Previous),
            other => Err(ParseActionError(other.to_string())),
        }
    }
}

/// Apply a transport action to the controller
pub fn dispatch<E: AudioEngine>(
    controller: &mut PlaybackController<E>,
    action: TransportAction,
) -> Result<()> {
    match action {
        TransportAction::PlayPause => controller.play_pause(),
        TransportAction::Repeat => {
            controller.toggle_repeat();
            Ok(())
        }
        TransportAction::Shuffle => {
            controller.toggle_shuffle();
            Ok(())
        }
        TransportAction::Forward => controller.advance(Direction::Forward),
        TransportAction::Previous => controller.advance(Direction::Previous),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for action in TransportAction::ALL {
            assert_eq!(action.name().parse::<TransportAction>(), Ok(action));
        }
    }

    #[test]
    fn short_aliases() {
        assert_eq!("p".parse(), Ok(TransportAction::PlayPause));
        assert_eq!(" N ".parse(), Ok(TransportAction::Forward));
        assert_eq!("b".parse(), Ok(TransportAction::Previous));
    }

    #[test]
    fn unknown_action_is_rejected() {
        let err = "rewind".parse::<TransportAction>().unwrap_err();
        assert_eq!(err.to_string(), "unknown transport action: rewind");
    }
}
