//! Durable key/value storage backing the project store.
//!
//! Each key maps to one serialized blob. The file backend keeps one JSON
//! file per key inside the data directory and writes it atomically.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::rc::Rc;

use crate::error::DashResult;

/// A namespaced blob store.
pub trait Storage {
    /// Read the blob stored under `key`, or `None` if nothing was written yet.
    fn read(&self, key: &str) -> DashResult<Option<String>>;

    /// Replace the blob stored under `key`.
    fn write(&self, key: &str, value: &str) -> DashResult<()>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> DashResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> DashResult<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        f.write_all(value.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, path)?;
        Ok(())
    }
}

/// Process-local storage. Clones share the same map, so a second store
/// opened on a clone sees what the first one wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    blobs: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw blob, bypassing any serialization.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.blobs.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> DashResult<Option<String>> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> DashResult<()> {
        self.insert_raw(key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(storage.read("project-storage").unwrap().is_none());
    }

    #[test]
    fn test_file_storage_write_replaces_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.write("project-storage", "{\"projects\":[]}").unwrap();
        storage.write("project-storage", "{\"projects\":[1]}").unwrap();

        assert_eq!(storage.read("project-storage").unwrap().as_deref(), Some("{\"projects\":[1]}"));
        assert!(storage.path_for("project-storage").exists());
        assert!(!dir.path().join("project-storage.json.tmp").exists());
    }

    #[test]
    fn test_memory_storage_clones_share_state() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage.write("k", "v").unwrap();
        assert_eq!(other.read("k").unwrap().as_deref(), Some("v"));
        assert!(other.read("missing").unwrap().is_none());
    }
}
