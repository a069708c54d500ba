//! Pipeline stages

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stage of the warehouse workflow, each backed by its own entity store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    PurchaseRequest,
    ProductionSchedule,
    ArrivalInspection,
    InboundRegister,
    QualityControl,
    Shipment,
    Inventory,
    /// Exception sink fed directly from arrival inspection
    RejectedOrder,
}

/// Every stage, main pipeline first, exception sink last.
pub const STAGES: &[Stage] = &[
    Stage::PurchaseRequest,
    Stage::ProductionSchedule,
    Stage::ArrivalInspection,
    Stage::InboundRegister,
    Stage::QualityControl,
    Stage::Shipment,
    Stage::Inventory,
    Stage::RejectedOrder,
];

impl Stage {
    /// The stage a promoted record lands in, or None for sink stages.
    pub fn downstream(self) -> Option<Stage> {
        match self {
            Stage::PurchaseRequest => Some(Stage::ProductionSchedule),
            Stage::ProductionSchedule => Some(Stage::ArrivalInspection),
            Stage::ArrivalInspection => Some(Stage::InboundRegister),
            Stage::InboundRegister => Some(Stage::QualityControl),
            Stage::QualityControl => Some(Stage::Shipment),
            Stage::Shipment => Some(Stage::Inventory),
            Stage::Inventory | Stage::RejectedOrder => None,
        }
    }

    /// Short prefix used for generated record ids
    pub fn id_prefix(self) -> &'static str {
        match self {
            Stage::PurchaseRequest => "PR",
            Stage::ProductionSchedule => "PS",
            Stage::ArrivalInspection => "AI",
            Stage::InboundRegister => "IR",
            Stage::QualityControl => "QC",
            Stage::Shipment => "SHP",
            Stage::Inventory => "INV",
            Stage::RejectedOrder => "RJ",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::PurchaseRequest => "purchase_request",
            Stage::ProductionSchedule => "production_schedule",
            Stage::ArrivalInspection => "arrival_inspection",
            Stage::InboundRegister => "inbound_register",
            Stage::QualityControl => "quality_control",
            Stage::Shipment => "shipment",
            Stage::Inventory => "inventory",
            Stage::RejectedOrder => "rejected_order",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STAGES
            .iter()
            .copied()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| format!("Unknown stage: {}", s))
    }
}

/// Generate a fresh opaque id for a record in `stage`, e.g. `QC-3f2a...`.
pub fn new_record_id(stage: Stage) -> String {
    format!("{}-{}", stage.id_prefix(), Uuid::new_v4().simple())
}
