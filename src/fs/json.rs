//! JSON file operations with schema validation
//!
//! Provides functions to read and write JSON files with serde validation.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{Result, StockflowError};
use crate::schemas::Config;

use super::paths::get_config_path;

/// Read a whole file as text, returning None when it does not exist.
pub fn read_text(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StockflowError::Io(e)),
    }
}

/// Read and deserialize a JSON file.
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidJson` - If the file contains invalid JSON or does not match the expected shape
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = read_text(path)?.ok_or_else(|| {
        StockflowError::FileNotFound(format!("File not found: {}", path.display()))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        StockflowError::InvalidJson(format!("Invalid JSON in file {}: {}", path.display(), e))
    })
}

/// Write `content` so readers see either the old file or the new one, never a partial write.
///
/// Writes to a sibling temp file, syncs it, then renames over the target.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.write_all(b"\n")?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Write a value to a JSON file with pretty formatting.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(data)
        .map_err(|e| StockflowError::InvalidJson(e.to_string()))?;
    write_atomic(path, &content)
}

/// Read the config.json file for a project.
///
/// Returns the default config if the file doesn't exist.
pub fn read_config(root: &Path) -> Result<Config> {
    let path = get_config_path(root);
    if !path.exists() {
        return Ok(Config::default());
    }
    read_json(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_json_file_not_found() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.json");

        let result: Result<Config> = read_json(&path);
        assert!(matches!(result.unwrap_err(), StockflowError::FileNotFound(_)));
    }

    #[test]
    fn test_read_json_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("invalid.json");
        fs::write(&path, "not valid json {").unwrap();

        let result: Result<Config> = read_json(&path);
        assert!(matches!(result.unwrap_err(), StockflowError::InvalidJson(_)));
    }

    #[test]
    fn test_write_and_read_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");

        let config = Config {
            persist_pipeline: false,
            ..Config::default()
        };
        write_json(&path, &config).unwrap();

        let read: Config = read_json(&path).unwrap();
        assert!(!read.persist_pipeline);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_write_atomic_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("dir").join("store.json");

        write_atomic(&path, "[]").unwrap();
        assert_eq!(read_text(&path).unwrap().unwrap(), "[]\n");
    }

    #[test]
    fn test_read_text_missing_is_none() {
        let temp = TempDir::new().unwrap();
        assert!(read_text(&temp.path().join("absent.json")).unwrap().is_none());
    }

    #[test]
    fn test_read_config_default_when_missing() {
        let temp = TempDir::new().unwrap();
        let config = read_config(temp.path()).unwrap();
        assert_eq!(config.storage_dir, ".stockflow/data");
    }
}
