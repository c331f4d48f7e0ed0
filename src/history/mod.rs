//! Bounded undo/redo history.
//!
//! This module provides a command history that allows an editing session to
//! undo and redo its actions. Every reversible edit is recorded as a
//! [`Command`] that knows how to apply and revert itself; the history only
//! decides which command to call and in which order.
//!
//! ## Behaviour
//!
//! - Recording a command after undoing discards the undone commands
//! - Once `capacity` commands are held, recording evicts the oldest one
//! - Undo/redo at either end of the history is a silent no-op
//!
//! ## Module Structure
//!
//! - [`command`] - `Command` trait and the closure based `FnCommand`
//! - [`command_history`] - `CommandHistory`, the bounded sequence and cursor
//! - [`error`] - Errors for commands and history construction

pub mod command;
pub mod command_history;
pub mod error;


// Re-exports
pub use command::{Command, FnCommand};
pub use command_history::CommandHistory;
pub use error::{CapacityError, CommandError};
