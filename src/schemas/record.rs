//! Stage-agnostic view over the per-stage record types

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::StatusFlow;

use super::inbound::InboundRegisterRecord;
use super::inspection::ArrivalInspection;
use super::inventory::InventoryItem;
use super::meta::{NaturalKey, RecordMeta};
use super::production::ProductionSchedule;
use super::purchase::PurchaseRequest;
use super::quality::QualityControlRecord;
use super::rejected::RejectedOrder;
use super::shipment::Shipment;
use super::stage::Stage;

/// Implemented by every record type that lives in an entity store.
pub trait StageRecord: Clone + Serialize + DeserializeOwned {
    /// The store this record type belongs to
    const STAGE: Stage;

    type Status: StatusFlow;

    fn meta(&self) -> &RecordMeta;

    fn meta_mut(&mut self) -> &mut RecordMeta;

    fn status(&self) -> Self::Status;

    fn set_status(&mut self, status: Self::Status);

    fn into_record(self) -> Record;

    /// Unwrap a [`Record`] of this stage, or None for any other stage
    fn from_record(record: Record) -> Option<Self>;

    fn id(&self) -> &str {
        &self.meta().id
    }

    fn natural_key(&self) -> NaturalKey {
        self.meta().natural_key()
    }
}

/// A record from any stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", content = "record", rename_all = "snake_case")]
pub enum Record {
    PurchaseRequest(PurchaseRequest),
    ProductionSchedule(ProductionSchedule),
    ArrivalInspection(ArrivalInspection),
    InboundRegister(InboundRegisterRecord),
    QualityControl(QualityControlRecord),
    Shipment(Shipment),
    Inventory(InventoryItem),
    RejectedOrder(RejectedOrder),
}

impl Record {
    pub fn stage(&self) -> Stage {
        match self {
            Record::PurchaseRequest(_) => Stage::PurchaseRequest,
            Record::ProductionSchedule(_) => Stage::ProductionSchedule,
            Record::ArrivalInspection(_) => Stage::ArrivalInspection,
            Record::InboundRegister(_) => Stage::InboundRegister,
            Record::QualityControl(_) => Stage::QualityControl,
            Record::Shipment(_) => Stage::Shipment,
            Record::Inventory(_) => Stage::Inventory,
            Record::RejectedOrder(_) => Stage::RejectedOrder,
        }
    }

    pub fn meta(&self) -> &RecordMeta {
        match self {
            Record::PurchaseRequest(r) => &r.meta,
            Record::ProductionSchedule(r) => &r.meta,
            Record::ArrivalInspection(r) => &r.meta,
            Record::InboundRegister(r) => &r.meta,
            Record::QualityControl(r) => &r.meta,
            Record::Shipment(r) => &r.meta,
            Record::Inventory(r) => &r.meta,
            Record::RejectedOrder(r) => &r.meta,
        }
    }

    pub fn id(&self) -> &str {
        &self.meta().id
    }

    pub fn natural_key(&self) -> NaturalKey {
        self.meta().natural_key()
    }

    /// Whether the record's status admits no further change
    pub fn is_terminal(&self) -> bool {
        match self {
            Record::PurchaseRequest(r) => r.status.is_terminal(),
            Record::ProductionSchedule(r) => r.status.is_terminal(),
            Record::ArrivalInspection(r) => r.status.is_terminal(),
            Record::InboundRegister(r) => r.status.is_terminal(),
            Record::QualityControl(r) => r.status.is_terminal(),
            Record::Shipment(r) => r.status.is_terminal(),
            Record::Inventory(r) => r.status.is_terminal(),
            Record::RejectedOrder(r) => r.status.is_terminal(),
        }
    }

    /// Stage-specific status rendered as its wire name
    pub fn status_label(&self) -> String {
        match self {
            Record::PurchaseRequest(r) => r.status.to_string(),
            Record::ProductionSchedule(r) => r.status.to_string(),
            Record::ArrivalInspection(r) => r.status.to_string(),
            Record::InboundRegister(r) => r.status.to_string(),
            Record::QualityControl(r) => r.status.to_string(),
            Record::Shipment(r) => r.status.to_string(),
            Record::Inventory(r) => r.status.to_string(),
            Record::RejectedOrder(r) => r.status.to_string(),
        }
    }
}

macro_rules! stage_record {
    ($record:ty, $stage:ident, $status:ty) => {
        impl StageRecord for $record {
            const STAGE: Stage = Stage::$stage;

            type Status = $status;

            fn meta(&self) -> &RecordMeta {
                &self.meta
            }

            fn meta_mut(&mut self) -> &mut RecordMeta {
                &mut self.meta
            }

            fn status(&self) -> $status {
                self.status
            }

            fn set_status(&mut self, status: $status) {
                self.status = status;
            }

            fn into_record(self) -> Record {
                Record::$stage(self)
            }

            fn from_record(record: Record) -> Option<Self> {
                match record {
                    Record::$stage(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl From<$record> for Record {
            fn from(record: $record) -> Self {
                Record::$stage(record)
            }
        }
    };
}

stage_record!(PurchaseRequest, PurchaseRequest, super::purchase::PurchaseRequestStatus);
stage_record!(ProductionSchedule, ProductionSchedule, super::production::ProductionStatus);
stage_record!(ArrivalInspection, ArrivalInspection, super::inspection::InspectionStatus);
stage_record!(InboundRegisterRecord, InboundRegister, super::inbound::InboundStatus);
stage_record!(QualityControlRecord, QualityControl, super::quality::QualityStatus);
stage_record!(Shipment, Shipment, super::shipment::ShipmentStatus);
stage_record!(InventoryItem, Inventory, super::inventory::InventoryStatus);
stage_record!(RejectedOrder, RejectedOrder, super::rejected::RejectedStatus);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{InspectionStatus, Sku};

    fn inspection() -> ArrivalInspection {
        let meta = RecordMeta::new("AI-1", "PR-1", "SKU-1", Sku::new("C", "Crate", "misc"));
        ArrivalInspection::new(meta, 50.0)
    }

    #[test]
    fn test_record_tagging() {
        let record = Record::from(inspection());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["stage"], "arrival_inspection");
        assert_eq!(json["record"]["expectedQuantity"], 50.0);
        assert_eq!(record.stage(), Stage::ArrivalInspection);
        assert_eq!(record.status_label(), "pending");
        assert!(!record.is_terminal());
    }

    #[test]
    fn test_from_record_rejects_other_stages() {
        let record = inspection().into_record();
        assert!(Shipment::from_record(record.clone()).is_none());
        let back = ArrivalInspection::from_record(record).unwrap();
        assert_eq!(back.status(), InspectionStatus::Pending);
        assert_eq!(back.id(), "AI-1");
    }
}
