//! Task record and the bundled seed list.

use serde::{Deserialize, Serialize};

/// Longest title the edit screen accepts.
pub const MAX_TITLE_LEN: usize = 30;

/// One to-do item.
///
/// Serialized as `{ "id": number, "title": string, "completed": boolean }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

impl Task {
    /// Create an open task.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Task {
            id,
            title: title.into(),
            completed: false,
        }
    }
}

const SEED_JSON: &str = include_str!("../data/seed.json");

/// The default task list used when storage has nothing to offer.
pub fn seed_tasks() -> Vec<Task> {
    match serde_json::from_str(SEED_JSON) {
        Ok(tasks) => tasks,
        Err(e) => {
            tracing::error!("bundled seed list is invalid: {e}");
            Vec::new()
        }
    }
}
