//! Unit tests for the session module.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::{EditHistory, HistoryFailure, HistoryPlugin, HistoryRequest};
use crate::config::AppConfigData;
use crate::history::{CommandError, FnCommand};

fn counter_command(
    counter: &Arc<AtomicI64>,
    amount: i64,
) -> FnCommand<
    impl FnMut() -> Result<(), CommandError> + Send + Sync + 'static,
    impl FnMut() -> Result<(), CommandError> + Send + Sync + 'static,
> {
    let (a, r) = (counter.clone(), counter.clone());
    FnCommand::new(
        move || {
            a.fetch_add(amount, Ordering::SeqCst);
            Ok::<(), CommandError>(())
        },
        move || {
            r.fetch_sub(amount, Ordering::SeqCst);
            Ok::<(), CommandError>(())
        },
    )
    .with_label(format!("add {}", amount))
}

fn failing_undo_command() -> FnCommand<
    impl FnMut() -> Result<(), CommandError> + Send + Sync + 'static,
    impl FnMut() -> Result<(), CommandError> + Send + Sync + 'static,
> {
    FnCommand::new(
        || Ok::<(), CommandError>(()),
        || Err::<(), CommandError>(CommandError::new("layer is locked")),
    )
}

fn session_app(capacity: usize) -> App {
    let mut app = App::new();
    app.add_plugins(HistoryPlugin::new(NonZeroUsize::new(capacity).unwrap()));
    app
}

fn record(app: &mut App, counter: &Arc<AtomicI64>, amount: i64) {
    app.world_mut()
        .resource_mut::<EditHistory>()
        .record(counter_command(counter, amount), true)
        .unwrap();
}

fn request(app: &mut App, request: HistoryRequest) {
    app.world_mut()
        .resource_mut::<Messages<HistoryRequest>>()
        .write(request);
    app.update();
}

fn press_chord(app: &mut App, keys: &[KeyCode]) {
    {
        let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        for key in keys {
            input.press(*key);
        }
    }
    app.update();

    let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    input.release_all();
    input.clear();
}

#[test]
fn test_plugin_uses_configured_capacity() {
    let app = session_app(7);
    let history = app.world().resource::<EditHistory>();
    assert_eq!(history.capacity().get(), 7);
    assert!(history.is_empty());
}

#[test]
fn test_plugin_from_config() {
    let config = AppConfigData {
        history_capacity: 12,
        ..Default::default()
    };
    assert_eq!(HistoryPlugin::from_config(&config).capacity.get(), 12);
}

#[test]
fn test_requests_step_history() {
    let counter = Arc::new(AtomicI64::new(0));
    let mut app = session_app(4);

    record(&mut app, &counter, 1);
    record(&mut app, &counter, 2);
    record(&mut app, &counter, 3);
    assert_eq!(counter.load(Ordering::SeqCst), 6);

    request(&mut app, HistoryRequest::Undo);
    assert_eq!(counter.load(Ordering::SeqCst), 3);
    request(&mut app, HistoryRequest::Undo);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
    request(&mut app, HistoryRequest::Redo);
    assert_eq!(counter.load(Ordering::SeqCst), 3);

    let history = app.world().resource::<EditHistory>();
    assert_eq!(history.undo_labels().next(), Some("add 2"));
    assert_eq!(history.redo_labels().next(), Some("add 3"));
}

#[test]
fn test_requests_in_one_frame_apply_in_order() {
    let counter = Arc::new(AtomicI64::new(0));
    let mut app = session_app(4);

    record(&mut app, &counter, 1);
    record(&mut app, &counter, 2);

    {
        let mut messages = app.world_mut().resource_mut::<Messages<HistoryRequest>>();
        messages.write(HistoryRequest::Undo);
        messages.write(HistoryRequest::Undo);
        messages.write(HistoryRequest::Redo);
    }
    app.update();

    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert_eq!(app.world().resource::<EditHistory>().position(), 1);
}

#[test]
fn test_ctrl_z_undoes() {
    let counter = Arc::new(AtomicI64::new(0));
    let mut app = session_app(4);
    record(&mut app, &counter, 5);

    press_chord(&mut app, &[KeyCode::ControlLeft, KeyCode::KeyZ]);
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[test]
fn test_redo_shortcuts() {
    let counter = Arc::new(AtomicI64::new(0));
    let mut app = session_app(4);
    record(&mut app, &counter, 1);
    record(&mut app, &counter, 2);

    press_chord(&mut app, &[KeyCode::ControlLeft, KeyCode::KeyZ]);
    press_chord(&mut app, &[KeyCode::ControlLeft, KeyCode::KeyZ]);
    assert_eq!(counter.load(Ordering::SeqCst), 0);

    press_chord(&mut app, &[KeyCode::ControlRight, KeyCode::KeyY]);
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    press_chord(
        &mut app,
        &[KeyCode::ControlLeft, KeyCode::ShiftLeft, KeyCode::KeyZ],
    );
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[test]
fn test_z_without_ctrl_does_nothing() {
    let counter = Arc::new(AtomicI64::new(0));
    let mut app = session_app(4);
    record(&mut app, &counter, 5);

    press_chord(&mut app, &[KeyCode::KeyZ]);
    assert_eq!(counter.load(Ordering::SeqCst), 5);
}

#[test]
fn test_failed_undo_is_reported() {
    let mut app = session_app(4);
    assert!(app.world().resource::<HistoryFailure>().message.is_none());

    app.world_mut()
        .resource_mut::<EditHistory>()
        .record(failing_undo_command(), true)
        .unwrap();

    request(&mut app, HistoryRequest::Undo);

    let failure = app.world().resource::<HistoryFailure>();
    assert_eq!(failure.message.as_deref(), Some("layer is locked"));
    assert!(app.world().resource::<EditHistory>().can_redo());
}

#[test]
fn test_session_history_evicts_when_full() {
    let counter = Arc::new(AtomicI64::new(0));
    let mut app = session_app(2);

    record(&mut app, &counter, 1);
    record(&mut app, &counter, 2);
    record(&mut app, &counter, 3);

    for _ in 0..3 {
        request(&mut app, HistoryRequest::Undo);
    }
    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert_eq!(app.world().resource::<EditHistory>().len(), 2);
}
