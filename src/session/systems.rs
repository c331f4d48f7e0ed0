//! Bevy systems for undo/redo keyboard shortcuts and history requests.

use bevy::prelude::*;

use super::{EditHistory, HistoryFailure, HistoryRequest};

/// System to turn undo/redo shortcuts into [`HistoryRequest`]s
pub fn handle_history_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut requests: MessageWriter<HistoryRequest>,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);

    if !ctrl {
        return;
    }

    // Ctrl+Z (without shift) = undo
    if !shift && keyboard.just_pressed(KeyCode::KeyZ) {
        requests.write(HistoryRequest::Undo);
    }

    // Ctrl+Y or Ctrl+Shift+Z = redo
    if keyboard.just_pressed(KeyCode::KeyY) || (shift && keyboard.just_pressed(KeyCode::KeyZ)) {
        requests.write(HistoryRequest::Redo);
    }
}

/// System to step the history for every pending request, in order
pub fn apply_history_requests(
    mut requests: MessageReader<HistoryRequest>,
    mut history: ResMut<EditHistory>,
    mut failure: ResMut<HistoryFailure>,
) {
    for request in requests.read() {
        let result = match request {
            HistoryRequest::Undo => history.undo(),
            HistoryRequest::Redo => history.redo(),
        };

        match result {
            Ok(()) => debug!(
                "{:?} done ({} undoable, {} redoable)",
                request,
                history.undo_count(),
                history.redo_count()
            ),
            Err(e) => {
                error!("{:?} failed: {}", request, e);
                failure.message = Some(e.to_string());
            }
        }
    }
}
