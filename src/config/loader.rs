//! Configuration loading with defaults

use std::path::Path;

use crate::errors::Result;
use crate::fs;
use crate::schemas::Config;

/// Load configuration from the project, falling back to defaults.
///
/// If `.stockflow/config.json` exists it is read and merged with defaults,
/// then validated.
///
/// # Errors
/// * `InvalidJson` - If config.json is not valid JSON
/// * `ConfigError` - If the storage keys are empty, path-like or identical
pub fn load_config(root: &Path) -> Result<Config> {
    let config = fs::read_config(root)?;
    config.validate()?;
    tracing::debug!(
        storage_dir = %config.storage_dir,
        persist_pipeline = config.persist_pipeline,
        "config loaded"
    );
    Ok(config)
}
