//! The full set of entity stores, addressable by stage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{Result, StockflowError};
use crate::schemas::{
    ArrivalInspection, InboundRegisterRecord, InventoryItem, ProductionSchedule, PurchaseRequest,
    QualityControlRecord, Record, RejectedOrder, Shipment, Stage, StageRecord,
};

use super::entity_store::{InsertOutcome, Store};

/// Run `$body` with `$store` bound to the store for `$stage`.
macro_rules! with_store {
    ($state:expr, $stage:expr, |$store:ident| $body:expr) => {
        match $stage {
            Stage::PurchaseRequest => { let $store = &$state.purchase_requests; $body }
            Stage::ProductionSchedule => { let $store = &$state.production_schedules; $body }
            Stage::ArrivalInspection => { let $store = &$state.arrival_inspections; $body }
            Stage::InboundRegister => { let $store = &$state.inbound_registers; $body }
            Stage::QualityControl => { let $store = &$state.quality_controls; $body }
            Stage::Shipment => { let $store = &$state.shipments; $body }
            Stage::Inventory => { let $store = &$state.inventory; $body }
            Stage::RejectedOrder => { let $store = &$state.rejected_orders; $body }
        }
    };
}

/// Mutable counterpart of `with_store!`.
macro_rules! with_store_mut {
    ($state:expr, $stage:expr, |$store:ident| $body:expr) => {
        match $stage {
            Stage::PurchaseRequest => { let $store = &mut $state.purchase_requests; $body }
            Stage::ProductionSchedule => { let $store = &mut $state.production_schedules; $body }
            Stage::ArrivalInspection => { let $store = &mut $state.arrival_inspections; $body }
            Stage::InboundRegister => { let $store = &mut $state.inbound_registers; $body }
            Stage::QualityControl => { let $store = &mut $state.quality_controls; $body }
            Stage::Shipment => { let $store = &mut $state.shipments; $body }
            Stage::Inventory => { let $store = &mut $state.inventory; $body }
            Stage::RejectedOrder => { let $store = &mut $state.rejected_orders; $body }
        }
    };
}

/// Canonical records for every stage.
///
/// Serializes as the whole-pipeline snapshot. Rejected orders are skipped
/// there because they persist under their own key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseState {
    #[serde(default)]
    pub purchase_requests: Store<PurchaseRequest>,
    #[serde(default)]
    pub production_schedules: Store<ProductionSchedule>,
    #[serde(default)]
    pub arrival_inspections: Store<ArrivalInspection>,
    #[serde(default)]
    pub inbound_registers: Store<InboundRegisterRecord>,
    #[serde(default)]
    pub quality_controls: Store<QualityControlRecord>,
    #[serde(default)]
    pub shipments: Store<Shipment>,
    #[serde(default)]
    pub inventory: Store<InventoryItem>,
    #[serde(skip)]
    pub rejected_orders: Store<RejectedOrder>,
}

impl WarehouseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records of `stage` in insertion order
    pub fn list(&self, stage: Stage) -> Vec<Record> {
        with_store!(self, stage, |store| store
            .list()
            .iter()
            .cloned()
            .map(StageRecord::into_record)
            .collect())
    }

    pub fn get(&self, stage: Stage, id: &str) -> Result<Record> {
        with_store!(self, stage, |store| store.require(id).map(|r| r.clone().into_record()))
    }

    pub fn count(&self, stage: Stage) -> usize {
        with_store!(self, stage, |store| store.len())
    }

    /// Replace the whole contents of `stage`. Every record must belong to it.
    pub fn replace_all(&mut self, stage: Stage, records: Vec<Record>) -> Result<()> {
        with_store_mut!(self, stage, |store| {
            let typed = records
                .into_iter()
                .map(|record| typed_for(stage, record))
                .collect::<Result<Vec<_>>>()?;
            store.replace_all(typed);
            Ok(())
        })
    }

    /// Merge `patch` into the record, stamping `updatedAt`. No validation.
    pub fn upsert_by_field(
        &mut self,
        stage: Stage,
        id: &str,
        patch: &Map<String, Value>,
        now: DateTime<Utc>,
    ) -> Result<Record> {
        with_store_mut!(self, stage, |store| store
            .upsert_by_field(id, patch, now)
            .map(StageRecord::into_record))
    }

    /// Insert a record into its own stage unless its natural key is taken
    pub fn insert_if_absent(&mut self, record: Record) -> InsertOutcome {
        match record {
            Record::PurchaseRequest(r) => self.purchase_requests.insert_if_absent(r),
            Record::ProductionSchedule(r) => self.production_schedules.insert_if_absent(r),
            Record::ArrivalInspection(r) => self.arrival_inspections.insert_if_absent(r),
            Record::InboundRegister(r) => self.inbound_registers.insert_if_absent(r),
            Record::QualityControl(r) => self.quality_controls.insert_if_absent(r),
            Record::Shipment(r) => self.shipments.insert_if_absent(r),
            Record::Inventory(r) => self.inventory.insert_if_absent(r),
            Record::RejectedOrder(r) => self.rejected_orders.insert_if_absent(r),
        }
    }

    /// All records, across stages, for one purchase request number
    pub fn workflow_instance(&self, purchase_request_number: &str) -> Vec<Record> {
        crate::schemas::STAGES
            .iter()
            .flat_map(|&stage| self.list(stage))
            .filter(|record| record.meta().purchase_request_number == purchase_request_number)
            .collect()
    }
}

fn typed_for<T: StageRecord>(stage: Stage, record: Record) -> Result<T> {
    let found = record.stage();
    T::from_record(record).ok_or_else(|| {
        StockflowError::SchemaValidation(format!(
            "{} record cannot be stored under {}",
            found, stage
        ))
    })
}
