//! Spindle terminal player
//!
//! Pieces of the `spindle` binary that are worth testing on their own:
//! configuration loading, the silent clock engine, console command parsing
//! and update rendering.

pub mod config;
pub mod console;
pub mod display;
pub mod engine;
pub mod error;

pub use config::PlayerConfig;
pub use console::{parse_line, ConsoleCommand};
pub use display::Display;
pub use engine::ClockEngine;
pub use error::{CliError, Result};
