//! # todo - a terminal to-do list
//!
//! Create, toggle, rename and delete short text tasks from a TUI or the
//! command line. The whole list is stored as one JSON array under the
//! `TodoApp` key (`~/.todo/TodoApp.json` by default).
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the TUI
//! todo
//!
//! # Open the edit screen for task 3
//! todo ui --route /todos/3
//!
//! # Scriptable commands
//! todo add "Buy milk"
//! todo toggle 4
//! todo edit 4 "Buy oat milk"
//! todo list
//! ```
//!
//! ## Layout
//!
//! - `store` - key-value blob store and the JSON item store on top of it
//! - `persist` - background worker serializing every storage access
//! - `todos` - the list screen's in-memory task list
//! - `theme` - light/dark palettes passed explicitly to renderers
//! - `tui` - list and edit screens, routing, terminal setup
//!
//! Logs are written to `<data-dir>/todo.log`; set `RUST_LOG` to change the filter.

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod logging;
pub mod persist;
pub mod store;
pub mod task;
pub mod theme;
pub mod todos;
pub mod tui {
    pub mod app;
    pub mod edit_screen;
    pub mod enums;
    pub mod input;
    pub mod list_screen;
    pub mod run;
}

use cli::Cli;
use cmd::*;
use config::{default_data_dir, Config};
use persist::Persister;
use store::{FileBlobStore, ItemStore, MemoryBlobStore};
use theme::ThemeContext;

fn main() {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(|| {
        cli.data_dir
            .clone()
            .unwrap_or_else(default_data_dir)
            .join("config.toml")
    });
    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config {}: {e}", config_path.display());
            std::process::exit(1);
        }
    };

    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| config.data_dir.clone())
        .unwrap_or_else(default_data_dir);

    let _log_guard = match logging::init(&data_dir, &config.log_level) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to set up logging in {}: {e}", data_dir.display());
            std::process::exit(1);
        }
    };
    tracing::info!(data_dir = %data_dir.display(), "starting");

    // Declared after the log guard so pending writes drain before logs flush.
    let store = if cli.ephemeral {
        ItemStore::new(MemoryBlobStore::new())
    } else {
        ItemStore::new(FileBlobStore::new(&data_dir))
    };
    let persister = Persister::spawn(store);
    let persist = persister.handle();
    let theme = ThemeContext::new(config.color_scheme.resolve());

    let command = cli.command.unwrap_or(Commands::Ui {
        route: "/".to_string(),
    });
    match command {
        Commands::Ui { route } => cmd_ui(persist, theme, &route),
        Commands::Add { title } => cmd_add(persist, &title),
        Commands::List => cmd_list(persist),
        Commands::Toggle { id } => cmd_toggle(persist, id),
        Commands::Remove { id } => cmd_remove(persist, id),
        Commands::Edit { id, title } => cmd_edit(persist, &id, &title),
        Commands::Completions { shell } => cmd_completions(shell),
    }
}
