//! Enumerations for TUI navigation and state management.

use std::fmt;

/// A screen address, mirroring `/` and `/todos/:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    /// Raw id segment from the path; matched against `Task::id` as a string.
    Edit(String),
}

impl Route {
    /// Parse a route path. Returns `None` for anything but `/` and `/todos/<digits>`.
    pub fn parse(path: &str) -> Option<Self> {
        if path == "/" {
            return Some(Route::List);
        }
        let id = path.strip_prefix("/todos/")?;
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        Some(Route::Edit(id.to_string()))
    }

    pub fn edit(id: u64) -> Self {
        Route::Edit(id.to_string())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::List => write!(f, "/"),
            Route::Edit(id) => write!(f, "/todos/{id}"),
        }
    }
}

/// What a screen asks the app to do after handling a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Navigate(Route),
    Quit,
}

/// Which part of the list screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    List,
}
