//! Opening a coordinator over an on-disk project

use std::path::{Path, PathBuf};

use crate::config::load_config;
use crate::errors::{Result, StockflowError};
use crate::fs::{find_project_root, get_config_path, get_stockflow_dir, get_storage_dir, write_json};
use crate::schemas::Config;
use crate::snapshot::FileStore;

use super::coordinator::Coordinator;

/// Locate the project above `start` and restore its state from disk
pub fn open_project(start: &Path) -> Result<Coordinator<FileStore>> {
    let root = find_project_root(start)?;
    let config = load_config(&root)?;
    let storage_dir = get_storage_dir(&root, &config);

    tracing::debug!(root = %root.display(), storage = %storage_dir.display(), "opening project");
    Ok(Coordinator::open(FileStore::new(storage_dir), &config))
}

/// Create `.stockflow/` with a default config.json and an empty storage dir.
///
/// Returns the storage directory. An existing config is kept unless `force` is set.
pub fn init_project(root: &Path, force: bool) -> Result<PathBuf> {
    let config_path = get_config_path(root);
    if config_path.exists() && !force {
        return Err(StockflowError::ConfigError(format!(
            "{} already initialized (use force to overwrite)",
            get_stockflow_dir(root).display()
        )));
    }

    let config = Config::default();
    write_json(&config_path, &config)?;

    let storage_dir = get_storage_dir(root, &config);
    std::fs::create_dir_all(&storage_dir).map_err(|e| {
        StockflowError::wrap(e, format!("creating storage dir {}", storage_dir.display()))
    })?;

    tracing::info!(root = %root.display(), "project initialized");
    Ok(storage_dir)
}
