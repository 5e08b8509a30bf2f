//! Routing of task snapshots between the durable and the volatile backend.
//!
//! Every [`PersistenceAdapter::save`] and [`PersistenceAdapter::load`] probes the
//! durable backend first and falls back to the volatile one when the probe
//! fails. There is no retry: a failed read or write is reported to the caller
//! and the operation is abandoned.

use super::storage::{Storage, StorageError};
use super::task::{next_id, Task, TaskId};
use thiserror::Error;
use tracing::debug;

/// Key the task list is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "todolist_tasks";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to serialize tasks: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to parse saved tasks: {0}")]
    Deserialize(#[source] serde_json::Error),
    #[error("saved task ids leave no room for new tasks (largest id is {0})")]
    IdsExhausted(TaskId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Backend a save ended up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTarget {
    Durable,
    Volatile,
}

/// Restored collection plus the identifier the next new task should get.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub tasks: Vec<Task>,
    pub next_id: TaskId,
}

impl Default for Snapshot {
    fn default() -> Self {
        Snapshot { tasks: Vec::new(), next_id: 1 }
    }
}

pub struct PersistenceAdapter {
    durable: Box<dyn Storage>,
    volatile: Box<dyn Storage>,
    key: String,
}

impl PersistenceAdapter {
    pub fn new(durable: Box<dyn Storage>, volatile: Box<dyn Storage>, key: &str) -> Self {
        PersistenceAdapter {
            durable,
            volatile,
            key: key.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_durable_backend_available(&self) -> bool {
        self.durable.probe()
    }

    fn backend(&self) -> (&dyn Storage, SaveTarget) {
        if self.is_durable_backend_available() {
            (self.durable.as_ref(), SaveTarget::Durable)
        } else {
            (self.volatile.as_ref(), SaveTarget::Volatile)
        }
    }

    /// Writes the whole ordered collection under the configured key.
    pub fn save(&self, tasks: &[Task]) -> Result<SaveTarget, PersistenceError> {
        let serialized = serde_json::to_string(tasks).map_err(PersistenceError::Serialize)?;
        let (backend, target) = self.backend();
        backend.set_item(&self.key, &serialized)?;

        debug!(count = tasks.len(), ?target, "tasks saved");
        Ok(target)
    }

    /// Reads the collection back. A missing key yields an empty snapshot.
    pub fn load(&self) -> Result<Snapshot, PersistenceError> {
        let (backend, source) = self.backend();
        let Some(saved) = backend.get_item(&self.key)? else {
            debug!(?source, "no saved tasks");
            return Ok(Snapshot::default());
        };

        let tasks: Vec<Task> = serde_json::from_str(&saved).map_err(PersistenceError::Deserialize)?;
        let next_id = next_id(&tasks).ok_or(PersistenceError::IdsExhausted(TaskId::MAX))?;

        debug!(count = tasks.len(), next_id, ?source, "tasks loaded");
        Ok(Snapshot { tasks, next_id })
    }
}
