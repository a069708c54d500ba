//! Inventory item schema - end of the main pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::meta::RecordMeta;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryStatus {
    InStock,
}

impl std::fmt::Display for InventoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InventoryStatus::InStock => write!(f, "in_stock"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(flatten)]
    pub meta: RecordMeta,

    pub status: InventoryStatus,

    pub shipment_id: String,

    pub quantity: f64,

    pub total_volume: f64,

    pub total_weight: f64,

    /// Shipment destination the goods were received at
    pub location: String,

    pub received_at: DateTime<Utc>,
}
