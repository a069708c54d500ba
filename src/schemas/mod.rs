//! Schema types for stockflow
//!
//! One closed record shape per stage. JSON field names are camelCase so the
//! snapshots line up with what presentation layers already consume.

mod config;
mod inbound;
mod inspection;
mod inventory;
mod meta;
mod packaging;
mod production;
mod purchase;
mod quality;
mod raw;
mod record;
mod rejected;
mod shipment;
mod stage;

pub use config::Config;
pub use inbound::{InboundRegisterRecord, InboundStatus};
pub use inspection::{ArrivalInspection, InspectionStatus};
pub use inventory::{InventoryItem, InventoryStatus};
pub use meta::{NaturalKey, RecordMeta, Sku};
pub use packaging::{Derivations, PackagingInputs};
pub use production::{ProductionSchedule, ProductionStatus};
pub use purchase::{NewPurchaseRequest, PurchaseRequest, PurchaseRequestStatus};
pub use quality::{QualityControlRecord, QualityStatus};
pub use raw::{staged_value, RawInput, RawInputError};
pub use record::{Record, StageRecord};
pub use rejected::{RejectedOrder, RejectedStatus};
pub use shipment::{Shipment, ShipmentItem, ShipmentStatus};
pub use stage::{new_record_id, Stage, STAGES};
