//! Path resolution utilities for stockflow
//!
//! Provides functions to locate the project root and construct paths
//! to configuration and snapshot files.

use std::path::{Path, PathBuf};

use crate::errors::{Result, StockflowError};
use crate::schemas::Config;

/// Find the project root: the nearest ancestor holding a `.stockflow` directory.
///
/// # Errors
/// * `ProjectNotFound` - If no ancestor contains `.stockflow`
pub fn find_project_root(start_cwd: &Path) -> Result<PathBuf> {
    let mut current = start_cwd
        .canonicalize()
        .map_err(|e| StockflowError::ProjectNotFound(format!("Cannot resolve path: {}", e)))?;

    loop {
        if get_stockflow_dir(&current).is_dir() {
            return Ok(current);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => {
                return Err(StockflowError::ProjectNotFound(
                    "Could not find a directory containing .stockflow".to_string(),
                ));
            }
        }
    }
}

/// Resolve the current working directory, optionally using an override.
pub fn resolve_cwd(cwd_option: Option<&Path>) -> PathBuf {
    match cwd_option {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Get the path to the .stockflow directory.
pub fn get_stockflow_dir(root: &Path) -> PathBuf {
    root.join(".stockflow")
}

/// Get the path to the config.json file.
pub fn get_config_path(root: &Path) -> PathBuf {
    get_stockflow_dir(root).join("config.json")
}

/// Directory holding snapshot files; relative `storageDir` values resolve against `root`.
pub fn get_storage_dir(root: &Path, config: &Config) -> PathBuf {
    let dir = Path::new(&config.storage_dir);
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        root.join(dir)
    }
}

/// Snapshot file for a storage key
pub fn get_snapshot_path(storage_dir: &Path, key: &str) -> PathBuf {
    storage_dir.join(format!("{}.json", key))
}
