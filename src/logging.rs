//! File and stdout logging setup.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing_subscriber::prelude::*;

const LOG_FILE_NAME: &str = "undoforge.log";

/// Append a session separator to an existing log file
pub fn write_session_separator(log_file_path: &Path) -> std::io::Result<()> {
    let mut file = OpenOptions::new().append(true).open(log_file_path)?;
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let separator = "=".repeat(80);
    writeln!(
        file,
        "\n\n{}\n=== New Session Started at {} ===\n{}\n",
        separator, timestamp, separator
    )
}

/// Set up logging to `logs_dir` and stdout.
///
/// `RUST_LOG` wins over `default_filter`. The returned guard flushes the file
/// writer when dropped, so keep it alive for the duration of the program.
pub fn setup_logging(
    logs_dir: &Path,
    default_filter: &str,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    if std::fs::create_dir_all(logs_dir).is_err() {
        eprintln!("Failed to create logs directory");
        return None;
    }

    let log_file_path = logs_dir.join(LOG_FILE_NAME);
    if log_file_path.exists() {
        let _ = write_session_separator(&log_file_path);
    }

    let file_appender = tracing_appender::rolling::never(logs_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // No ANSI colors in the file
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true)
        .with_level(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
    {
        eprintln!("Logging already initialized: {}", e);
        return None;
    }

    Some(guard)
}
