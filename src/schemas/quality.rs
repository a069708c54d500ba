//! Quality control schema - created only by promoting an inbound register record

use serde::{Deserialize, Serialize};

use super::meta::RecordMeta;
use super::packaging::{Derivations, PackagingInputs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityStatus {
    PendingShipment,
    PreShipment,
    Shipped,
}

impl std::fmt::Display for QualityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualityStatus::PendingShipment => write!(f, "pending_shipment"),
            QualityStatus::PreShipment => write!(f, "pre_shipment"),
            QualityStatus::Shipped => write!(f, "shipped"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityControlRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,

    pub status: QualityStatus,

    /// Inbound register record this one was promoted from
    pub inbound_id: String,

    pub expected_quantity: f64,

    pub received_quantity: f64,

    #[serde(flatten)]
    pub packaging: PackagingInputs,

    pub derived: Derivations,

    #[serde(default)]
    pub container_number: Option<String>,

    #[serde(default)]
    pub destination: Option<String>,

    #[serde(default)]
    pub shipped_by: Option<String>,
}
