//! Optional TOML configuration.
//!
//! Looked up at `<data_dir>/config.toml` unless `--config` points elsewhere.
//! A missing file means defaults; a malformed one is an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TodoError};
use crate::theme::SchemePreference;

/// User settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where the task list and log file live.
    pub data_dir: Option<PathBuf>,
    pub color_scheme: SchemePreference,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: None,
            color_scheme: SchemePreference::System,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load from `path`, returning defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| TodoError::Config(e.to_string()))
    }
}

/// `~/.todo`, or `./.todo` when no home directory is known.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".todo")
}
