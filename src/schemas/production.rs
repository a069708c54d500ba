//! Production schedule schema

use serde::{Deserialize, Serialize};

use super::meta::RecordMeta;
use super::raw::RawInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionStatus {
    Pending,
    Scheduled,
    InProduction,
    Completed,
}

impl std::fmt::Display for ProductionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductionStatus::Pending => write!(f, "pending"),
            ProductionStatus::Scheduled => write!(f, "scheduled"),
            ProductionStatus::InProduction => write!(f, "in_production"),
            ProductionStatus::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionSchedule {
    #[serde(flatten)]
    pub meta: RecordMeta,

    pub status: ProductionStatus,

    /// Carried from the purchase request quantity
    pub planned_quantity: f64,

    #[serde(default)]
    pub completed_quantity: Option<RawInput>,

    #[serde(default)]
    pub machine: Option<String>,

    #[serde(default)]
    pub packaging_method: Option<String>,

    /// Assigned operator
    #[serde(default)]
    pub operator: Option<String>,

    #[serde(default)]
    pub scheduled_date: Option<String>,

    #[serde(default)]
    pub completed_by: Option<String>,
}

impl ProductionSchedule {
    pub fn new(meta: RecordMeta, planned_quantity: f64) -> Self {
        ProductionSchedule {
            meta,
            status: ProductionStatus::Pending,
            planned_quantity,
            completed_quantity: None,
            machine: None,
            packaging_method: None,
            operator: None,
            scheduled_date: None,
            completed_by: None,
        }
    }
}
