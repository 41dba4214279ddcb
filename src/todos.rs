//! In-memory task list owned by the list screen.
//!
//! Ordering policy: sorted descending by id once on load, new tasks are
//! prepended afterwards. Every change queues a full-list overwrite.

use crate::persist::PersistHandle;
use crate::task::{seed_tasks, Task};

/// The list screen's working copy of the task list.
pub struct TodoList {
    tasks: Vec<Task>,
    persist: PersistHandle,
}

impl TodoList {
    /// Load from storage, falling back to the seed list when storage is empty.
    /// The seed list is written back so the edit screen can find its records.
    pub fn initialize(persist: PersistHandle) -> Self {
        let mut tasks = persist.load();
        let seeded = tasks.is_empty();
        if seeded {
            tracing::info!("no stored tasks, using seed list");
            tasks = seed_tasks();
        }
        // Highest id first.
        tasks.sort_by(|a, b| b.id.cmp(&a.id));
        let list = TodoList { tasks, persist };
        if seeded {
            list.persist();
        }
        list
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks not yet completed.
    pub fn remaining(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    /// Next id to hand out, `None` once the highest id is `u64::MAX`.
    pub fn next_id(&self) -> Option<u64> {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0).checked_add(1)
    }

    /// Prepend a new open task. Returns `None` if the title is blank or no
    /// id is left.
    pub fn add(&mut self, title: &str) -> Option<u64> {
        if title.trim().is_empty() {
            return None;
        }
        let Some(id) = self.next_id() else {
            tracing::error!("task ids exhausted; not adding {title:?}");
            return None;
        };
        self.tasks.insert(0, Task::new(id, title));
        self.persist();
        Some(id)
    }

    /// Flip the completed flag. Returns false if no task has this id.
    pub fn toggle(&mut self, id: u64) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.completed = !task.completed;
        self.persist();
        true
    }

    /// Delete a task. Returns false if no task has this id.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return false;
        }
        self.persist();
        true
    }

    fn persist(&self) {
        self.persist.overwrite(self.tasks.clone());
    }
}
