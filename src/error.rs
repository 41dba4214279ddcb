//! Error types shared across the application.
//!
//! Storage failures never reach the user; they are logged where they happen.
//! Everything here is for the fatal startup paths: config and log setup.

use std::io;

/// Errors that can stop a command from running.
#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    /// Filesystem or terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The config file exists but could not be understood.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience alias for results carrying a [`TodoError`].
pub type Result<T> = std::result::Result<T, TodoError>;
