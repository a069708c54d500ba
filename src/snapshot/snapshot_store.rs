//! Typed snapshots over a key-value backend

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{Result, StockflowError};
use crate::schemas::{Config, RejectedOrder};
use crate::store::WarehouseState;

use super::backend::KeyValueStore;

/// Loads and saves whole-store snapshots under fixed keys
#[derive(Debug)]
pub struct SnapshotStore<S> {
    backend: S,
    rejected_orders_key: String,
    pipeline_key: String,
}

impl<S: KeyValueStore> SnapshotStore<S> {
    pub fn new(backend: S, config: &Config) -> Self {
        SnapshotStore {
            backend,
            rejected_orders_key: config.rejected_orders_key.clone(),
            pipeline_key: config.pipeline_key.clone(),
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Rejected orders saved by an earlier process; empty on absent or corrupt storage.
    pub fn load_rejected_orders(&self) -> Vec<RejectedOrder> {
        self.load(&self.rejected_orders_key).unwrap_or_default()
    }

    pub fn save_rejected_orders(&self, records: &[RejectedOrder]) -> Result<()> {
        self.save(&self.rejected_orders_key, records)
    }

    /// Pipeline snapshot saved by an earlier process, if a readable one exists.
    pub fn load_pipeline(&self) -> Option<WarehouseState> {
        self.load(&self.pipeline_key)
    }

    pub fn save_pipeline(&self, state: &WarehouseState) -> Result<()> {
        self.save(&self.pipeline_key, state)
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let payload = match self.backend.get(key) {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                tracing::debug!(key, "no snapshot stored yet");
                return None;
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "snapshot unreadable, starting empty");
                return None;
            }
        };

        match serde_json::from_str(&payload) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "snapshot corrupt, starting empty");
                None
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let payload = serde_json::to_string_pretty(value)
            .map_err(|e| StockflowError::PersistenceFailure(format!("{}: {}", key, e)))?;
        self.backend
            .put(key, &payload)
            .map_err(|e| StockflowError::PersistenceFailure(format!("{}: {}", key, e)))
    }
}
