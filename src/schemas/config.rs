//! Config schema - Configuration for stockflow

use serde::{Deserialize, Serialize};

use crate::errors::{Result, StockflowError};

/// Main configuration for stockflow
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Directory holding the snapshot files, relative to the project root
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,

    /// Save the whole pipeline snapshot after every mutation
    #[serde(default = "default_persist_pipeline")]
    pub persist_pipeline: bool,

    /// Storage key for the rejected-orders store
    #[serde(default = "default_rejected_orders_key")]
    pub rejected_orders_key: String,

    /// Storage key for the main pipeline snapshot
    #[serde(default = "default_pipeline_key")]
    pub pipeline_key: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_storage_dir() -> String {
    ".stockflow/data".to_string()
}

fn default_persist_pipeline() -> bool {
    true
}

fn default_rejected_orders_key() -> String {
    "rejected_orders".to_string()
}

fn default_pipeline_key() -> String {
    "pipeline".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schema_version: default_schema_version(),
            storage_dir: default_storage_dir(),
            persist_pipeline: default_persist_pipeline(),
            rejected_orders_key: default_rejected_orders_key(),
            pipeline_key: default_pipeline_key(),
        }
    }
}

impl Config {
    /// Reject configurations whose storage keys would collide or escape the storage dir
    pub fn validate(&self) -> Result<()> {
        for key in [&self.rejected_orders_key, &self.pipeline_key] {
            if key.trim().is_empty() {
                return Err(StockflowError::ConfigError("storage keys must not be empty".to_string()));
            }
            if key.contains(['/', '\\']) || key.starts_with('.') {
                return Err(StockflowError::ConfigError(format!(
                    "storage key {:?} must be a plain file stem",
                    key
                )));
            }
        }
        if self.rejected_orders_key == self.pipeline_key {
            return Err(StockflowError::ConfigError(
                "rejectedOrdersKey and pipelineKey must differ".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.schema_version, 1);
        assert_eq!(config.storage_dir, ".stockflow/data");
        assert!(config.persist_pipeline);
        assert_eq!(config.rejected_orders_key, "rejected_orders");
        assert_eq!(config.pipeline_key, "pipeline");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_partial_json() {
        let json = r#"{"persistPipeline": false}"#;
        let parsed: Config = serde_json::from_str(json).unwrap();

        assert!(!parsed.persist_pipeline);
        assert_eq!(parsed.storage_dir, ".stockflow/data");
        assert_eq!(parsed.pipeline_key, "pipeline");
    }

    #[test]
    fn test_config_validate_rejects_colliding_keys() {
        let config = Config {
            pipeline_key: "rejected_orders".to_string(),
            ..Config::default()
        };
        assert_eq!(config.validate().unwrap_err().code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_config_validate_rejects_path_like_keys() {
        let config = Config {
            rejected_orders_key: "../escape".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
