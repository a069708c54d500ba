//! Arrival inspection schema

use serde::{Deserialize, Serialize};

use super::meta::RecordMeta;
use super::raw::RawInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionStatus {
    Pending,
    /// Passed; an inbound register record exists downstream
    Completed,
    /// Failed inspection
    Rejected,
}

impl std::fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InspectionStatus::Pending => write!(f, "pending"),
            InspectionStatus::Completed => write!(f, "completed"),
            InspectionStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalInspection {
    #[serde(flatten)]
    pub meta: RecordMeta,

    pub status: InspectionStatus,

    pub expected_quantity: f64,

    #[serde(default)]
    pub arrived_quantity: Option<RawInput>,

    /// Person who physically inspected the goods
    #[serde(default)]
    pub inspector: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub completed_by: Option<String>,
}

impl ArrivalInspection {
    pub fn new(meta: RecordMeta, expected_quantity: f64) -> Self {
        ArrivalInspection {
            meta,
            status: InspectionStatus::Pending,
            expected_quantity,
            arrived_quantity: None,
            inspector: None,
            notes: None,
            completed_by: None,
        }
    }
}
