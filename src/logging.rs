//! File logging. The TUI owns the terminal, so logs go to `<data_dir>/todo.log`.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::Result;

/// Install the global subscriber. Keep the guard alive until exit so buffered lines are flushed.
pub fn init(data_dir: &Path, default_level: &str) -> Result<WorkerGuard> {
    fs::create_dir_all(data_dir)?;
    let appender = tracing_appender::rolling::never(data_dir, "todo.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("todo_app={default_level}")));

    // A second init (tests, re-entry) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    Ok(guard)
}
