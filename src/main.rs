use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use undoforge::{CommandError, EditHistory, FnCommand, HistoryPlugin, HistoryRequest};
use undoforge::{config, logging, paths};

/// One step of the scripted editing session
#[derive(Debug, Clone, Copy)]
enum Step {
    Edit(i64),
    Undo,
    Redo,
}

const SCRIPT: &[Step] = &[
    Step::Edit(1),
    Step::Edit(2),
    Step::Edit(3),
    Step::Undo,
    Step::Undo,
    Step::Undo,
    Step::Undo,
    Step::Redo,
    Step::Redo,
    Step::Redo,
    Step::Redo,
    Step::Undo,
    Step::Edit(10),
    Step::Redo,
];

/// Command adding `amount` to a shared counter
fn add_to_counter(
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

fn main() {
    if let Err(e) = paths::ensure_directories() {
        eprintln!("Failed to create app directories: {}", e);
    }

    let loaded = config::load_config(&paths::config_file());

    // Keep the guard alive for the duration of the program
    let _log_guard = logging::setup_logging(&paths::logs_dir(), &loaded.config.data.log_filter);

    if let Some(reason) = &loaded.reset_reason {
        warn!("{}", reason);
    }
    if !loaded.config.config_path.exists() {
        config::save_config(&loaded.config);
    }

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(HistoryPlugin::from_config(&loaded.config.data));

    let counter = Arc::new(AtomicI64::new(0));
    info!(
        "Replaying {} steps with history capacity {}",
        SCRIPT.len(),
        loaded.config.data.capacity()
    );

    for step in SCRIPT {
        match *step {
            Step::Edit(amount) => {
                let result = app
                    .world_mut()
                    .resource_mut::<EditHistory>()
                    .record(add_to_counter(&counter, amount), true);
                if let Err(e) = result {
                    error!("Edit failed: {}", e);
                }
            }
            Step::Undo | Step::Redo => {
                let request = if matches!(step, Step::Undo) {
                    HistoryRequest::Undo
                } else {
                    HistoryRequest::Redo
                };
                app.world_mut()
                    .resource_mut::<Messages<HistoryRequest>>()
                    .write(request);
            }
        }
        app.update();
        info!("{:?} -> counter = {}", step, counter.load(Ordering::SeqCst));
    }

    let history = app.world().resource::<EditHistory>();
    info!(
        "Session finished: {} undoable, {} redoable, saved: {}",
        history.undo_count(),
        history.redo_count(),
        history.is_saved()
    );
}
