//! Stage transition logic
//!
//! Pure functions: the input record is never mutated. Promotion returns the
//! promoted source alongside the record synthesized for the next stage; the
//! caller commits both.

use chrono::{DateTime, Utc};

use crate::errors::{Result, StockflowError};
use crate::schemas::{
    ArrivalInspection, InboundRegisterRecord, InventoryItem, InventoryStatus, PackagingInputs,
    ProductionSchedule, PurchaseRequest, QualityControlRecord, QualityStatus, Shipment,
    ShipmentItem, ShipmentStatus, Stage, StageRecord,
};

use super::derivation::derive;
use super::states::StatusFlow;
use super::validation::{validate_advance, validate_promotion, InputCheck};

/// A promoted source record and the record synthesized downstream of it
#[derive(Debug, Clone)]
pub struct Promotion<S, N> {
    pub source: S,
    pub downstream: N,
}

/// Records that can be promoted into a following stage.
pub trait Promotable: StageRecord {
    type Next: StageRecord;

    /// Validate required inputs, then build the promoted source (status set,
    /// `updatedAt` stamped, actor recorded) and its downstream counterpart.
    fn promote(&self, actor: &str, now: DateTime<Utc>) -> Result<Promotion<Self, Self::Next>>;
}

/// Clone `record` into its promoted status
fn promoted<R: StageRecord>(record: &R, now: DateTime<Utc>) -> R {
    let mut next = record.clone();
    next.set_status(<R::Status as StatusFlow>::PROMOTED);
    next.meta_mut().touch_at(now);
    next
}

impl Promotable for PurchaseRequest {
    type Next = ProductionSchedule;

    fn promote(&self, actor: &str, now: DateTime<Utc>) -> Result<Promotion<Self, Self::Next>> {
        validate_promotion(self.status).into_result()?;

        let mut check = InputCheck::new(Stage::PurchaseRequest);
        let quantity = check.number("quantity", self.quantity.as_ref());
        check.text("supplier", self.supplier.as_deref());
        check.finish()?;

        let mut source = promoted(self, now);
        source.approved_by = Some(actor.to_string());

        let downstream =
            ProductionSchedule::new(self.meta.carry_into(Stage::ProductionSchedule, now), quantity);

        Ok(Promotion { source, downstream })
    }
}

impl Promotable for ProductionSchedule {
    type Next = ArrivalInspection;

    fn promote(&self, actor: &str, now: DateTime<Utc>) -> Result<Promotion<Self, Self::Next>> {
        validate_promotion(self.status).into_result()?;

        let mut check = InputCheck::new(Stage::ProductionSchedule);
        let completed_quantity = check.number("completedQuantity", self.completed_quantity.as_ref());
        check.text("machine", self.machine.as_deref());
        check.text("packagingMethod", self.packaging_method.as_deref());
        check.text("operator", self.operator.as_deref());
        check.finish()?;

        let mut source = promoted(self, now);
        source.completed_by = Some(actor.to_string());

        let downstream = ArrivalInspection::new(
            self.meta.carry_into(Stage::ArrivalInspection, now),
            completed_quantity,
        );

        Ok(Promotion { source, downstream })
    }
}

impl Promotable for ArrivalInspection {
    type Next = InboundRegisterRecord;

    fn promote(&self, actor: &str, now: DateTime<Utc>) -> Result<Promotion<Self, Self::Next>> {
        validate_promotion(self.status).into_result()?;

        let mut check = InputCheck::new(Stage::ArrivalInspection);
        let expected = check.quantity("expectedQuantity", self.expected_quantity);
        let arrived = check.number("arrivedQuantity", self.arrived_quantity.as_ref());
        check.text("inspector", self.inspector.as_deref());
        check.finish()?;

        let mut source = promoted(self, now);
        source.completed_by = Some(actor.to_string());

        let downstream = InboundRegisterRecord::new(
            self.meta.carry_into(Stage::InboundRegister, now),
            expected,
            arrived,
        );

        Ok(Promotion { source, downstream })
    }
}

impl Promotable for InboundRegisterRecord {
    type Next = QualityControlRecord;

    fn promote(&self, actor: &str, now: DateTime<Utc>) -> Result<Promotion<Self, Self::Next>> {
        validate_promotion(self.status).into_result()?;

        let mut check = InputCheck::new(Stage::InboundRegister);
        let packaging = PackagingInputs {
            package_count: check.number("packageCount", self.package_count.as_ref()),
            total_pieces: check.number("totalPieces", self.total_pieces.as_ref()),
            pieces_per_unit: check.number("piecesPerUnit", self.pieces_per_unit.as_ref()),
            box_length: check.number("boxLength", self.box_length.as_ref()),
            box_width: check.number("boxWidth", self.box_width.as_ref()),
            box_height: check.number("boxHeight", self.box_height.as_ref()),
            unit_weight: check.number("unitWeight", self.unit_weight.as_ref()),
        };
        check.finish()?;

        let derived = derive(&packaging);

        let mut source = promoted(self, now);
        source.derived = Some(derived);
        source.completed_by = Some(actor.to_string());

        let downstream = QualityControlRecord {
            meta: self.meta.carry_into(Stage::QualityControl, now),
            status: QualityStatus::PendingShipment,
            inbound_id: self.meta.id.clone(),
            expected_quantity: self.expected_quantity,
            received_quantity: self.received_quantity,
            packaging,
            derived,
            container_number: None,
            destination: None,
            shipped_by: None,
        };

        Ok(Promotion { source, downstream })
    }
}

impl Promotable for QualityControlRecord {
    type Next = Shipment;

    fn promote(&self, actor: &str, now: DateTime<Utc>) -> Result<Promotion<Self, Self::Next>> {
        validate_promotion(self.status).into_result()?;

        let mut check = InputCheck::new(Stage::QualityControl);
        let container_number = check.text("containerNumber", self.container_number.as_deref());
        let destination = check.text("destination", self.destination.as_deref());
        check.finish()?;

        let mut source = promoted(self, now);
        source.shipped_by = Some(actor.to_string());

        let downstream = Shipment {
            meta: self.meta.carry_into(Stage::Shipment, now),
            status: ShipmentStatus::Preparing,
            quality_control_id: self.meta.id.clone(),
            container_number,
            destination,
            items: vec![ShipmentItem {
                sku_id: self.meta.sku_id.clone(),
                sku: self.meta.sku.clone(),
                quantity: self.derived.total_quantity,
                total_volume: self.derived.total_volume_m3,
                total_weight: self.derived.total_weight_kg,
            }],
            departure_date: None,
            arrival_date: None,
            delivered_by: None,
        };

        Ok(Promotion { source, downstream })
    }
}

impl Promotable for Shipment {
    type Next = InventoryItem;

    fn promote(&self, actor: &str, now: DateTime<Utc>) -> Result<Promotion<Self, Self::Next>> {
        validate_promotion(self.status).into_result()?;

        let mut check = InputCheck::new(Stage::Shipment);
        let quantity = check.quantity("items", self.total_quantity());
        check.text("departureDate", self.departure_date.as_deref());
        check.text("arrivalDate", self.arrival_date.as_deref());
        check.finish()?;

        let mut source = promoted(self, now);
        source.delivered_by = Some(actor.to_string());

        let downstream = InventoryItem {
            meta: self.meta.carry_into(Stage::Inventory, now),
            status: InventoryStatus::InStock,
            shipment_id: self.meta.id.clone(),
            quantity,
            total_volume: self.total_volume(),
            total_weight: self.total_weight(),
            location: self.destination.clone(),
            received_at: now,
        };

        Ok(Promotion { source, downstream })
    }
}

/// Move a record one status forward, stamping `updatedAt`.
pub fn advance_status<R: StageRecord>(record: &R, now: DateTime<Utc>) -> Result<R> {
    let current = record.status();
    let target = current.next().ok_or_else(|| {
        StockflowError::StateTransition(format!(
            "Cannot transition {} {} from terminal status: {}",
            R::STAGE,
            record.id(),
            current
        ))
    })?;

    validate_advance(current, target).into_result()?;

    let mut next = record.clone();
    next.set_status(target);
    next.meta_mut().touch_at(now);
    Ok(next)
}


#[cfg(test)]
mod tests {
    use super::fixtures::{filled_inbound, meta};
    use super::*;
    use crate::schemas::{
        InboundStatus, InspectionStatus, ProductionStatus, PurchaseRequestStatus, RawInput,
    };

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_promote_purchase_request() {
        let mut request = PurchaseRequest::new(meta("PR-1"));
        request.quantity = Some(RawInput::from("500"));
        request.supplier = Some("Acme Boxes".to_string());

        let now = Utc::now();
        let promotion = request.promote("alice", now).unwrap();

        assert_eq!(promotion.source.status, PurchaseRequestStatus::Approved);
        assert_eq!(promotion.source.approved_by.as_deref(), Some("alice"));
        assert_eq!(promotion.downstream.planned_quantity, 500.0);
        assert_eq!(promotion.downstream.status, ProductionStatus::Pending);
        assert_eq!(promotion.downstream.meta.natural_key(), request.meta.natural_key());
    }

    #[test]
    fn test_promote_production_reports_all_missing_fields() {
        let schedule = ProductionSchedule::new(meta("PS-1"), 500.0);
        let err = schedule.promote("alice", Utc::now()).unwrap_err();
        match err {
            StockflowError::IncompleteInput { fields, .. } => {
                assert_eq!(fields, vec!["completedQuantity", "machine", "packagingMethod", "operator"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_promote_inspection_carries_quantities() {
        let mut inspection = ArrivalInspection::new(meta("AI-1"), 500.0);
        inspection.arrived_quantity = Some(RawInput::Number(480.0));
        inspection.inspector = Some("dana".to_string());

        let promotion = inspection.promote("dana", Utc::now()).unwrap();
        assert_eq!(promotion.source.status, InspectionStatus::Completed);
        assert_eq!(promotion.downstream.expected_quantity, 500.0);
        assert_eq!(promotion.downstream.received_quantity, 480.0);
        assert!(promotion.downstream.derived.is_none());
    }

    #[test]
    fn test_promote_inbound_derives_reference_values() {
        let record = filled_inbound("IR-1");
        let promotion = record.promote("bob", Utc::now()).unwrap();

        let derived = promotion.source.derived.unwrap();
        assert!(close(derived.total_quantity, 120.0));
        assert!(close(derived.box_volume_m3, 0.009));
        assert!(close(derived.total_volume_m3, 0.09));
        assert!(close(derived.total_weight_kg, 5.0));

        let qc = promotion.downstream;
        assert_eq!(qc.status, QualityStatus::PendingShipment);
        assert_eq!(qc.inbound_id, "IR-1");
        assert_eq!(qc.derived, derived);
        assert_eq!(qc.packaging.total_pieces, 10.0);
        assert_eq!(qc.received_quantity, 118.0);
    }

    #[test]
    fn test_promote_inbound_zero_pieces_is_incomplete() {
        let mut record = filled_inbound("IR-1");
        record.total_pieces = Some(RawInput::Number(0.0));

        let err = record.promote("bob", Utc::now()).unwrap_err();
        assert_eq!(err.code(), "INCOMPLETE_INPUT");
        assert!(err.to_string().contains("totalPieces"));
    }

    #[test]
    fn test_promote_inbound_negative_length_is_invalid() {
        let mut record = filled_inbound("IR-1");
        record.box_length = Some(RawInput::Number(-5.0));

        let err = record.promote("bob", Utc::now()).unwrap_err();
        assert_eq!(err.code(), "INVALID_VALUE");
        assert!(err.to_string().contains("boxLength"));
    }

    #[test]
    fn test_promote_does_not_mutate_original() {
        let record = filled_inbound("IR-1");
        let original = record.clone();
        let _ = record.promote("bob", Utc::now());
        assert_eq!(record, original);
        assert_eq!(record.status, InboundStatus::Pending);
    }

    #[test]
    fn test_promote_quality_control_builds_shipment_line() {
        let mut qc = filled_inbound("IR-1").promote("bob", Utc::now()).unwrap().downstream;
        qc.container_number = Some("MSCU1234567".to_string());
        qc.destination = Some(" Rotterdam ".to_string());

        let promotion = qc.promote("carol", Utc::now()).unwrap();
        let shipment = promotion.downstream;
        assert_eq!(promotion.source.status, QualityStatus::Shipped);
        assert_eq!(shipment.status, ShipmentStatus::Preparing);
        assert_eq!(shipment.destination, "Rotterdam");
        assert_eq!(shipment.items.len(), 1);
        assert!(close(shipment.items[0].quantity, 120.0));
        assert!(close(shipment.items[0].total_weight, 5.0));
    }

    #[test]
    fn test_promote_shipment_requires_dates() {
        let qc = {
            let mut qc = filled_inbound("IR-1").promote("bob", Utc::now()).unwrap().downstream;
            qc.container_number = Some("MSCU1234567".to_string());
            qc.destination = Some("Rotterdam".to_string());
            qc
        };
        let mut shipment = qc.promote("carol", Utc::now()).unwrap().downstream;

        let err = shipment.promote("erin", Utc::now()).unwrap_err();
        assert!(err.to_string().contains("departureDate, arrivalDate"));

        shipment.departure_date = Some("2024-06-01".to_string());
        shipment.arrival_date = Some("2024-06-20".to_string());
        let promotion = shipment.promote("erin", Utc::now()).unwrap();
        assert_eq!(promotion.source.status, ShipmentStatus::Delivered);
        assert_eq!(promotion.downstream.location, "Rotterdam");
        assert!(close(promotion.downstream.quantity, 120.0));
    }

    #[test]
    fn test_promote_rejected_inspection_fails() {
        let mut inspection = ArrivalInspection::new(meta("AI-1"), 500.0);
        inspection.status = InspectionStatus::Rejected;
        inspection.arrived_quantity = Some(RawInput::Number(480.0));
        inspection.inspector = Some("dana".to_string());

        let err = inspection.promote("dana", Utc::now()).unwrap_err();
        assert_eq!(err.code(), "STATE_TRANSITION");
    }

    #[test]
    fn test_advance_status() {
        let schedule = ProductionSchedule::new(meta("PS-1"), 10.0);
        let scheduled = advance_status(&schedule, Utc::now()).unwrap();
        assert_eq!(scheduled.status, ProductionStatus::Scheduled);
        let running = advance_status(&scheduled, Utc::now()).unwrap();
        assert_eq!(running.status, ProductionStatus::InProduction);

        let err = advance_status(&running, Utc::now()).unwrap_err();
        assert!(err.to_string().contains("only reachable by promotion"));
    }

    #[test]
    fn test_advance_from_terminal_status() {
        let mut record = filled_inbound("IR-1");
        record.status = InboundStatus::Completed;
        let err = advance_status(&record, Utc::now()).unwrap_err();
        assert!(err.to_string().contains("terminal status"));
    }
}
