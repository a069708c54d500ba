//! Key-value backends

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::errors::Result;
use crate::fs::{get_snapshot_path, read_text, write_atomic};

/// A durable facility addressed by a fixed key per store.
pub trait KeyValueStore {
    /// Payload stored under `key`, or None if nothing was ever saved
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the payload under `key`
    fn put(&self, key: &str, payload: &str) -> Result<()>;
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        read_text(&get_snapshot_path(&self.dir, key))
    }

    fn put(&self, key: &str, payload: &str) -> Result<()> {
        write_atomic(&get_snapshot_path(&self.dir, key), payload)
    }
}

/// In-process store for tests and embedding hosts without a disk
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw payload, e.g. to simulate corrupt storage
    pub fn with_entry(self, key: impl Into<String>, payload: impl Into<String>) -> Self {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), payload.into());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, payload: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, payload: &str) -> Result<()> {
        (**self).put(key, payload)
    }
}
