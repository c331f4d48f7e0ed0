//! Editing session integration for bevy apps.
//!
//! The session owns one [`EditHistory`] resource. Edits are recorded straight
//! into it; undo and redo arrive as [`HistoryRequest`] messages, either from
//! the keyboard shortcuts below or from UI code.
//!
//! ## Usage
//!
//! - **Ctrl+Z**: Undo the last action
//! - **Ctrl+Y** or **Ctrl+Shift+Z**: Redo the last undone action

mod systems;

#[cfg(test)]
mod tests;

use std::num::NonZeroUsize;

use bevy::prelude::*;

use crate::config::AppConfigData;
use crate::constants::DEFAULT_HISTORY_CAPACITY;
use crate::history::{Command, CommandError, CommandHistory};

pub use systems::{apply_history_requests, handle_history_shortcuts};

/// A type-erased command that can live in the session history
pub type BoxedCommand = Box<dyn Command<Error = CommandError> + Send + Sync>;

/// Resource holding the session's undo/redo history
#[derive(Resource, Deref, DerefMut, Default)]
pub struct EditHistory(pub CommandHistory<BoxedCommand>);

impl EditHistory {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self(CommandHistory::new(capacity))
    }

    /// Box `command` and add it to the history, running it if `execute` is set
    pub fn record<C>(&mut self, command: C, execute: bool) -> Result<(), CommandError>
    where
        C: Command<Error = CommandError> + Send + Sync + 'static,
    {
        self.0.add(Box::new(command), execute)
    }
}

/// Request to step the session history
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryRequest {
    Undo,
    Redo,
}

/// Resource tracking the last failed undo/redo for display to the user
#[derive(Resource, Default)]
pub struct HistoryFailure {
    pub message: Option<String>,
}

pub struct HistoryPlugin {
    pub capacity: NonZeroUsize,
}

impl HistoryPlugin {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self { capacity }
    }

    pub fn from_config(config: &AppConfigData) -> Self {
        Self::new(config.capacity())
    }
}

impl Default for HistoryPlugin {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl Plugin for HistoryPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(EditHistory::new(self.capacity))
            .init_resource::<HistoryFailure>()
            .init_resource::<ButtonInput<KeyCode>>()
            .add_message::<HistoryRequest>()
            .add_systems(
                Update,
                (handle_history_shortcuts, apply_history_requests).chain(),
            );
    }
}
