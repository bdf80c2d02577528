//! Runtime configuration: where data and logs live and which storage backend to use.

use std::path::{Path, PathBuf};

use crate::error::{DashResult, DashboardError};
use crate::storage::{FileStorage, MemoryStorage, Storage};

/// Directory name used under `$HOME` when no data directory is given.
pub const DEFAULT_DIR_NAME: &str = ".pdash";

/// Log file name inside the data directory.
pub const LOG_FILE_NAME: &str = "pdash.log";

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    File,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage: StorageKind,
    pub log_file: PathBuf,
}

impl Config {
    /// Resolve configuration from an explicit directory (flag or env, already
    /// merged by clap), falling back to `$HOME/.pdash` and then `./.pdash`.
    pub fn resolve(data_dir: Option<PathBuf>, ephemeral: bool) -> DashResult<Self> {
        let home = std::env::var_os("HOME").map(PathBuf::from);
        Self::resolve_with_home(data_dir, home.as_deref(), ephemeral)
    }

    fn resolve_with_home(data_dir: Option<PathBuf>, home: Option<&Path>, ephemeral: bool) -> DashResult<Self> {
        let data_dir = data_dir
            .or_else(|| home.map(|h| h.join(DEFAULT_DIR_NAME)))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR_NAME));

        if data_dir.exists() && !data_dir.is_dir() {
            return Err(DashboardError::config(format!(
                "data directory {} is not a directory",
                data_dir.display()
            )));
        }
        std::fs::create_dir_all(&data_dir)?;

        Ok(Config {
            log_file: data_dir.join(LOG_FILE_NAME),
            data_dir,
            storage: if ephemeral { StorageKind::Memory } else { StorageKind::File },
        })
    }

    /// Build the storage backend this configuration asks for.
    pub fn open_storage(&self) -> Box<dyn Storage> {
        match self.storage {
            StorageKind::File => Box::new(FileStorage::new(&self.data_dir)),
            StorageKind::Memory => Box::new(MemoryStorage::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_dir_wins_and_is_created() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("data");
        let config = Config::resolve_with_home(Some(dir.clone()), Some(Path::new("/nowhere")), false).unwrap();
        assert_eq!(config.data_dir, dir);
        assert!(dir.is_dir());
        assert_eq!(config.log_file, dir.join(LOG_FILE_NAME));
        assert_eq!(config.storage, StorageKind::File);
    }

    #[test]
    fn test_falls_back_to_home() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::resolve_with_home(None, Some(tmp.path()), true).unwrap();
        assert_eq!(config.data_dir, tmp.path().join(DEFAULT_DIR_NAME));
        assert_eq!(config.storage, StorageKind::Memory);
    }

    #[test]
    fn test_rejects_file_as_data_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("plain");
        std::fs::write(&file, "x").unwrap();
        let err = Config::resolve_with_home(Some(file), None, false).unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)));
    }
}
