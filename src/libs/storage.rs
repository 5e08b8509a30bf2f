//! Key-value storage backends.
//!
//! The task list is stored under a single key in whichever backend is usable:
//!
//! - [`FileStore`] is the durable backend. Each key is a `<key>.json` file in a
//!   directory, so the data survives across runs.
//! - [`MemoryStore`] is the volatile backend. It lives only as long as the
//!   process (or the interactive session) that created it.
//!
//! Availability is decided by [`Storage::probe`], which performs a throwaway
//! write and remove. The result is never cached: a directory that becomes
//! read-only mid-session is noticed on the next call.
//!
//! Keys become file names, so [`validate_key`] rejects anything that would
//! leave the directory or land on the configuration file.

use super::config::CONFIG_FILE_NAME;
use super::data_storage::DataStorage;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Key written and removed by [`Storage::probe`].
pub const PROBE_KEY: &str = "__storage_test__";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid storage key '{key}': {reason}")]
    InvalidKey { key: String, reason: &'static str },
}

/// Checks that `key` can name the task list in every backend.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key == PROBE_KEY {
        return Err(StorageError::InvalidKey {
            key: key.to_string(),
            reason: "reserved for availability checks",
        });
    }
    check_file_key(key)
}

fn check_file_key(key: &str) -> Result<(), StorageError> {
    let reason = if key.trim().is_empty() {
        "must not be empty"
    } else if key.contains(['/', '\\']) {
        "must not contain path separators"
    } else if key.contains("..") {
        "must not contain '..'"
    } else if format!("{}.json", key).eq_ignore_ascii_case(CONFIG_FILE_NAME) {
        "clashes with the configuration file"
    } else {
        return Ok(());
    };
    Err(StorageError::InvalidKey {
        key: key.to_string(),
        reason,
    })
}

pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// Returns whether a write followed by a remove succeeds right now.
    fn probe(&self) -> bool {
        self.set_item(PROBE_KEY, PROBE_KEY).and_then(|_| self.remove_item(PROBE_KEY)).is_ok()
    }
}

/// Durable backend: one JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    storage: DataStorage,
}

impl FileStore {
    pub fn new(storage: DataStorage) -> Self {
        FileStore { storage }
    }

    /// Store rooted at `dir` instead of the platform data directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        FileStore {
            storage: DataStorage::at(dir),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        check_file_key(key)?;
        self.storage.get_path(&format!("{}.json", key)).map_err(|source| StorageError::Io {
            key: key.to_string(),
            source,
        })
    }
}

impl Storage for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::write(path, value).map_err(|source| StorageError::Io {
            key: key.to_string(),
            source,
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// Volatile backend scoped to the current session.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
