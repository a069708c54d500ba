//! File system utilities for stockflow
//!
//! Provides path resolution and JSON file operations.

mod json;
mod paths;

pub use json::{read_config, read_json, read_text, write_atomic, write_json};
pub use paths::{
    find_project_root, get_config_path, get_snapshot_path, get_stockflow_dir, get_storage_dir,
    resolve_cwd,
};
