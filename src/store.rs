//! Key-value blob storage and the item store built on top of it.
//!
//! The whole task list lives under one key as a single JSON array. Loading is
//! fail-soft: a missing key, an unreadable file or a corrupt value all come
//! back as an empty list so callers can fall back to the seed data.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::task::Task;

/// Key the task list is stored under.
pub const STORAGE_KEY: &str = "TodoApp";

/// Failure while reading or writing the blob store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("could not encode task list: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// A string-keyed store of string blobs.
pub trait BlobStore: Send {
    /// Read the value under `key`, `Ok(None)` if nothing was ever written.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value under `key`.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Blob store keeping one file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileBlobStore { dir: dir.into() }
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileBlobStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(buf) => Ok(Some(buf)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Atomic-ish write via temp + rename.
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        f.write_all(value.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, path)?;
        Ok(())
    }
}

/// In-memory blob store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl MemoryBlobStore {
    /// Raw value under `key`, bypassing the item store.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    /// Put a raw value under `key`, bypassing the item store.
    pub fn put_raw(&self, key: &str, value: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
    }
}

impl BlobStore for MemoryBlobStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let items = self
            .items
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self
            .items
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Loads and saves the full task list under [`STORAGE_KEY`].
pub struct ItemStore {
    backend: Box<dyn BlobStore>,
}

impl ItemStore {
    pub fn new(backend: impl BlobStore + 'static) -> Self {
        ItemStore {
            backend: Box::new(backend),
        }
    }

    /// Load the stored list. Never fails: errors are logged and yield an empty list.
    pub fn load(&self) -> Vec<Task> {
        let raw = match self.backend.get_item(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("error reading task list, starting fresh: {e}");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::warn!("error parsing task list, starting fresh: {e}");
                Vec::new()
            }
        }
    }

    /// Overwrite the stored list with `tasks`.
    pub fn save(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
        let data = serde_json::to_string(tasks)?;
        self.backend.set_item(STORAGE_KEY, &data)
    }
}
