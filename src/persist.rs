//! Background persistence worker.
//!
//! A single thread owns the [`ItemStore`] and runs jobs in the order they were
//! sent. Every read-modify-write against the stored list goes through this
//! queue, so two screens can never interleave a load and a save.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::store::ItemStore;
use crate::task::Task;

enum Job {
    Overwrite(Vec<Task>),
    Upsert(Task),
    Load(Sender<Vec<Task>>),
    Flush(Sender<()>),
    Shutdown,
}

/// Owner of the persistence worker. Dropping it drains the queue and joins the thread.
pub struct Persister {
    handle: PersistHandle,
    worker: Option<JoinHandle<()>>,
}

/// Cheap, cloneable sender side of the persistence queue.
#[derive(Clone)]
pub struct PersistHandle {
    tx: Sender<Job>,
}

impl Persister {
    /// Start the worker thread.
    pub fn spawn(store: ItemStore) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker = thread::Builder::new()
            .name("todo-persist".into())
            .spawn(move || run_worker(store, rx));
        let worker = match worker {
            Ok(w) => Some(w),
            Err(e) => {
                tracing::error!("could not start persistence worker: {e}");
                None
            }
        };
        Persister {
            handle: PersistHandle { tx },
            worker,
        }
    }

    pub fn handle(&self) -> PersistHandle {
        self.handle.clone()
    }
}

impl Drop for Persister {
    fn drop(&mut self) {
        let _ = self.handle.tx.send(Job::Shutdown);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::error!("persistence worker panicked");
            }
        }
    }
}

impl PersistHandle {
    /// Queue a full overwrite of the stored list. Does not wait.
    pub fn overwrite(&self, tasks: Vec<Task>) {
        self.send(Job::Overwrite(tasks));
    }

    /// Queue an edit save: reload, drop any record with the same id, append `task`, write back.
    pub fn upsert(&self, task: Task) {
        self.send(Job::Upsert(task));
    }

    /// Load the stored list after every job queued before this call.
    pub fn load(&self) -> Vec<Task> {
        let (reply, rx) = mpsc::channel();
        if !self.send(Job::Load(reply)) {
            return Vec::new();
        }
        rx.recv().unwrap_or_else(|_| {
            tracing::warn!("persistence worker dropped a load request");
            Vec::new()
        })
    }

    /// Block until every job queued before this call has run.
    pub fn flush(&self) {
        let (reply, rx) = mpsc::channel();
        if self.send(Job::Flush(reply)) {
            let _ = rx.recv();
        }
    }

    fn send(&self, job: Job) -> bool {
        match self.tx.send(job) {
            Ok(()) => true,
            Err(_) => {
                tracing::warn!("persistence worker is gone; request ignored");
                false
            }
        }
    }
}

fn run_worker(mut store: ItemStore, rx: Receiver<Job>) {
    tracing::debug!("persistence worker started");
    while let Ok(job) = rx.recv() {
        match job {
            Job::Overwrite(tasks) => {
                tracing::debug!(count = tasks.len(), "saving task list");
                if let Err(e) = store.save(&tasks) {
                    tracing::error!("failed to save task list: {e}");
                }
            }
            Job::Upsert(task) => {
                tracing::debug!(id = task.id, "saving edited task");
                let mut tasks = store.load();
                tasks.retain(|t| t.id != task.id);
                tasks.push(task);
                if let Err(e) = store.save(&tasks) {
                    tracing::error!("failed to save edited task: {e}");
                }
            }
            Job::Load(reply) => {
                let _ = reply.send(store.load());
            }
            Job::Flush(reply) => {
                let _ = reply.send(());
            }
            Job::Shutdown => break,
        }
    }
    tracing::debug!("persistence worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryBlobStore, STORAGE_KEY};

    #[test]
    fn writes_apply_in_call_order() {
        let mem = MemoryBlobStore::new();
        let persister = Persister::spawn(ItemStore::new(mem.clone()));
        let handle = persister.handle();

        handle.overwrite(vec![Task::new(1, "first")]);
        handle.overwrite(vec![Task::new(2, "second")]);
        handle.overwrite(vec![Task::new(3, "third")]);

        assert_eq!(handle.load(), vec![Task::new(3, "third")]);
    }

    #[test]
    fn upsert_replaces_and_appends() {
        let mem = MemoryBlobStore::new();
        let persister = Persister::spawn(ItemStore::new(mem));
        let handle = persister.handle();

        handle.overwrite(vec![Task::new(3, "c"), Task::new(2, "b"), Task::new(1, "a")]);
        handle.upsert(Task::new(2, "edited"));

        let ids: Vec<u64> = handle.load().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn upsert_on_empty_storage_stores_single_record() {
        let persister = Persister::spawn(ItemStore::new(MemoryBlobStore::new()));
        let handle = persister.handle();
        handle.upsert(Task::new(9, "alone"));
        assert_eq!(handle.load(), vec![Task::new(9, "alone")]);
    }

    #[test]
    fn drop_drains_pending_writes() {
        let mem = MemoryBlobStore::new();
        {
            let persister = Persister::spawn(ItemStore::new(mem.clone()));
            persister.handle().overwrite(vec![Task::new(1, "kept")]);
        }
        assert!(mem.raw(STORAGE_KEY).unwrap().contains("kept"));
    }

    #[test]
    fn handle_outliving_worker_degrades_quietly() {
        let persister = Persister::spawn(ItemStore::new(MemoryBlobStore::new()));
        let handle = persister.handle();
        drop(persister);
        handle.overwrite(vec![Task::new(1, "lost")]);
        handle.flush();
        assert!(handle.load().is_empty());
    }
}
