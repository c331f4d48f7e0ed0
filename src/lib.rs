//! Bounded undo/redo command history for editing sessions.
//!
//! [`history`] holds the engine-agnostic core, [`session`] wires it into a
//! bevy app with keyboard shortcuts.

pub mod config;
pub mod constants;
pub mod history;
pub mod logging;
pub mod paths;
pub mod session;

pub use history::{CapacityError, Command, CommandError, CommandHistory, FnCommand};
pub use session::{EditHistory, HistoryFailure, HistoryPlugin, HistoryRequest};
