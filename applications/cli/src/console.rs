//! Console commands read from stdin

use crate::error::{CliError, Result};
use spindle_core::SongId;
use spindle_playback::{SessionCommand, TransportAction};
use std::time::Duration;

pub const HELP: &str = "\
commands:
  select <id>     play a song (again to pause/resume)
  p | play-pause  toggle play/pause
  n | forward     next playable song
  b | previous    previous playable song
  s | shuffle     toggle shuffle
  r | repeat      toggle repeat
  seek <secs>     jump within the current song
  vol <0-100>     set volume
  list            show the playlist
  status          show what is playing
  reload          fetch the playlist again
  q | quit        stop and exit";

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Session(SessionCommand),
    List,
    Status,
    Help,
    Quit,
}

/// Parse one input line; blank lines yield `None`
pub fn parse_line(line: &str) -> Result<Option<ConsoleCommand>> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();

    let command = match head.to_ascii_lowercase().as_str() {
        "select" | "sel" => {
            let id = SongId::new(required(arg, "select <id>")?);
            ConsoleCommand::Session(SessionCommand::Select(id))
        }
        "play" if arg.is_some() => {
            let id = SongId::new(required(arg, "select <id>")?);
            ConsoleCommand::Session(SessionCommand::Select(id))
        }
        "seek" => {
            let secs = parse_number::<u64>(required(arg, "seek <secs>")?)?;
            ConsoleCommand::Session(SessionCommand::Seek(Duration::from_secs(secs)))
        }
        "vol" | "volume" => {
            let level = parse_number::<u16>(required(arg, "vol <0-100>")?)?;
            ConsoleCommand::Session(SessionCommand::SetVolume(level.min(100) as u8))
        }
        "list" | "ls" => ConsoleCommand::List,
        "status" => ConsoleCommand::Status,
        "reload" => ConsoleCommand::Session(SessionCommand::Reload),
        "help" | "h" | "?" => ConsoleCommand::Help,
        "q" | "quit" | "exit" => ConsoleCommand::Quit,
        other => {
            let action: TransportAction = other
                .parse()
                .map_err(|e: spindle_playback::ParseActionError| {
                    CliError::InvalidCommand(e.to_string())
                })?;
            ConsoleCommand::Session(SessionCommand::Transport(action))
        }
    };

    Ok(Some(command))
}

fn required<'a>(arg: Option<&'a str>, usage: &str) -> Result<&'a str> {
    arg.ok_or_else(|| CliError::InvalidCommand(format!("usage: {usage}")))
}

fn parse_number<T: std::str::FromStr>(raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| CliError::InvalidCommand(format!("not a number: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(line: &str) -> SessionCommand {
        match parse_line(line).unwrap() {
            Some(ConsoleCommand::Session(command)) => command,
            other => panic!("expected session command, got {other:?}"),
        }
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn select_takes_an_id() {
        assert_eq!(
            session("select 4uLU6hMCjMI75M1A2tKUQC"),
            SessionCommand::Select(SongId::new("4uLU6hMCjMI75M1A2tKUQC"))
        );
        assert!(parse_line("select").is_err());
    }

    #[test]
    fn bare_play_is_play_pause() {
        assert_eq!(
            session("play"),
            SessionCommand::Transport(TransportAction::PlayPause)
        );
    }

    #[test]
    fn transport_aliases() {
        assert_eq!(session("n"), SessionCommand::Transport(TransportAction::Forward));
        assert_eq!(session("B"), SessionCommand::Transport(TransportAction::Previous));
        assert_eq!(session("shuffle"), SessionCommand::Transport(TransportAction::Shuffle));
    }

    #[test]
    fn seek_and_volume() {
        assert_eq!(session("seek 42"), SessionCommand::Seek(Duration::from_secs(42)));
        assert_eq!(session("vol 250"), SessionCommand::SetVolume(100));
        assert!(parse_line("vol loud").is_err());
    }

    #[test]
    fn unknown_command_is_rejected() {
        let err = parse_line("dance").unwrap_err();
        assert!(err.to_string().contains("dance"));
    }

    #[test]
    fn quit_and_list() {
        assert_eq!(parse_line("q").unwrap(), Some(ConsoleCommand::Quit));
        assert_eq!(parse_line("ls").unwrap(), Some(ConsoleCommand::List));
    }
}
