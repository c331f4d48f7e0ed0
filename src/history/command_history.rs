//! Bounded command history tracking undo/redo state.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use bevy::log::{debug, trace};

use super::command::Command;
use super::error::CapacityError;
use crate::constants::DEFAULT_HISTORY_CAPACITY;

/// Ordered, bounded sequence of commands with an undo/redo cursor.
///
/// Commands in `[0, position)` have been applied and can be undone, most
/// recent last. Commands in `[position, len)` were undone and can be redone,
/// soonest first. `position <= len <= capacity` always holds.
pub struct CommandHistory<C> {
    commands: VecDeque<C>,
    position: usize,
    capacity: NonZeroUsize,
    /// Cursor value matching the last save, `None` once it can't be reached
    saved: Option<usize>,
}

impl<C: Command> Default for CommandHistory<C> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl<C: Command> CommandHistory<C> {
    /// Create an empty history holding at most `capacity` commands
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            commands: VecDeque::with_capacity(capacity.get()),
            position: 0,
            capacity,
            saved: Some(0),
        }
    }

    /// Like [`new`](Self::new), rejecting a zero capacity
    pub fn with_capacity(capacity: usize) -> Result<Self, CapacityError> {
        NonZeroUsize::new(capacity)
            .map(Self::new)
            .ok_or(CapacityError)
    }

    /// Record a new command, optionally running it right away.
    ///
    /// Any undone commands are discarded first. If the history is still full
    /// afterwards the oldest command is evicted. The new command counts as
    /// applied even when `execute` is false. An error from `apply` is
    /// returned as-is and the command stays recorded.
    pub fn add(&mut self, command: C, execute: bool) -> Result<(), C::Error> {
        self.insert(command);
        if execute && let Some(command) = self.commands.back_mut() {
            trace!("Executing '{}'", command.label());
            command.apply()?;
        }
        Ok(())
    }

    /// Record a command whose effect has already been applied
    pub fn push(&mut self, command: C) {
        self.insert(command);
    }

    /// Revert the most recently applied command.
    ///
    /// Does nothing when there is nothing to undo. The cursor moves before
    /// `revert` runs, so a failing command is not retried by the next undo.
    pub fn undo(&mut self) -> Result<(), C::Error> {
        if self.position == 0 {
            trace!("Nothing to undo");
            return Ok(());
        }

        self.position -= 1;
        let command = &mut self.commands[self.position];
        trace!("Undoing '{}'", command.label());
        command.revert()
    }

    /// Re-apply the most recently undone command.
    ///
    /// Does nothing when there is nothing to redo. The cursor only advances
    /// once `apply` succeeds.
    pub fn redo(&mut self) -> Result<(), C::Error> {
        if self.position == self.commands.len() {
            trace!("Nothing to redo");
            return Ok(());
        }

        let command = &mut self.commands[self.position];
        trace!("Redoing '{}'", command.label());
        command.apply()?;
        self.position += 1;
        Ok(())
    }

    /// Drop every recorded command
    pub fn clear(&mut self) {
        self.saved = self.is_saved().then_some(0);
        self.commands.clear();
        self.position = 0;
    }

    /// Remember the current cursor as the clean (saved) state
    pub fn mark_saved(&mut self) {
        self.saved = Some(self.position);
    }

    /// Check whether the cursor sits on the last saved state
    pub fn is_saved(&self) -> bool {
        self.saved == Some(self.position)
    }

    /// Check if there are commands to undo
    pub fn can_undo(&self) -> bool {
        self.position > 0
    }

    /// Check if there are commands to redo
    pub fn can_redo(&self) -> bool {
        self.position < self.commands.len()
    }

    /// Get the count of undoable commands
    pub fn undo_count(&self) -> usize {
        self.position
    }

    /// Get the count of redoable commands
    pub fn redo_count(&self) -> usize {
        self.commands.len() - self.position
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Index separating applied commands from redoable ones
    pub fn position(&self) -> usize {
        self.position
    }

    /// Labels of undoable commands, most recent first
    pub fn undo_labels(&self) -> impl Iterator<Item = &str> {
        self.commands.range(..self.position).rev().map(|c| c.label())
    }

    /// Labels of redoable commands, next redo first
    pub fn redo_labels(&self) -> impl Iterator<Item = &str> {
        self.commands.range(self.position..).map(|c| c.label())
    }

    fn insert(&mut self, command: C) {
        self.prune_redo_branch();

        if self.commands.len() == self.capacity.get() {
            self.evict_oldest();
        }

        self.commands.push_back(command);
        self.position = self.commands.len();
    }

    /// Discard commands that were undone and can no longer be redone
    fn prune_redo_branch(&mut self) {
        if self.position == self.commands.len() {
            return;
        }

        debug!(
            "Discarding {} undone command(s)",
            self.commands.len() - self.position
        );
        self.commands.truncate(self.position);

        if self.saved.is_some_and(|saved| saved > self.position) {
            self.saved = None;
        }
    }

    fn evict_oldest(&mut self) {
        if let Some(oldest) = self.commands.pop_front() {
            debug!(
                "History full ({}), evicting '{}'",
                self.capacity,
                oldest.label()
            );
        }
        self.position = self.position.saturating_sub(1);
        self.saved = self.saved.and_then(|saved| saved.checked_sub(1));
    }
}

impl<C> std::fmt::Debug for CommandHistory<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandHistory")
            .field("len", &self.commands.len())
            .field("position", &self.position)
            .field("capacity", &self.capacity)
            .field("saved", &self.saved)
            .finish()
    }
}
