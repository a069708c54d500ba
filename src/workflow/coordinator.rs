//! Transition coordinator
//!
//! The only mutation surface over [`WarehouseState`]. Every operation takes
//! `&mut self`, so one mutation is in flight at a time and a compound
//! promotion is observed either not at all or with both stores updated.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::domain::{advance_status, InputCheck, Promotable, StatusFlow};
use crate::errors::{Result, StockflowError};
use crate::schemas::{
    Config, NewPurchaseRequest, PurchaseRequest, Record, RejectedOrder, RejectedStatus, Stage,
    StageRecord,
};
use crate::snapshot::{KeyValueStore, SnapshotStore};
use crate::store::{InsertOutcome, Store, WarehouseState};

use super::capability::Capability;

/// Raw fields an edit patch may set for `stage`.
///
/// Everything else (identity, timestamps, status, derived values, carried
/// quantities, links and actor stamps) is owned by promotion.
fn editable_fields(stage: Stage) -> &'static [&'static str] {
    match stage {
        Stage::PurchaseRequest => &["quantity", "supplier"],
        Stage::ProductionSchedule => &[
            "completedQuantity",
            "machine",
            "packagingMethod",
            "operator",
            "scheduledDate",
        ],
        Stage::ArrivalInspection => &["arrivedQuantity", "inspector", "notes"],
        Stage::InboundRegister => &[
            "packageCount",
            "totalPieces",
            "piecesPerUnit",
            "boxLength",
            "boxWidth",
            "boxHeight",
            "unitWeight",
        ],
        Stage::QualityControl => &["containerNumber", "destination"],
        Stage::Shipment => &["containerNumber", "destination", "departureDate", "arrivalDate"],
        Stage::Inventory => &["location"],
        Stage::RejectedOrder => &[],
    }
}

/// Result of a successful promotion
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionOutcome {
    /// The source record in its promoted status
    pub source: Record,

    /// The downstream record holding this workflow instance: freshly
    /// synthesized, or the one already present when `duplicate` is set
    pub downstream: Record,

    /// The downstream store already had this natural key; nothing was inserted
    pub duplicate: bool,
}

/// Owns the warehouse state and its snapshot persistence
#[derive(Debug)]
pub struct Coordinator<S> {
    state: WarehouseState,
    snapshots: SnapshotStore<S>,
    persist_pipeline: bool,
}

impl<S: KeyValueStore> Coordinator<S> {
    /// Restore state from `backend`. Absent or corrupt snapshots start empty.
    pub fn open(backend: S, config: &Config) -> Self {
        let snapshots = SnapshotStore::new(backend, config);

        let mut state = if config.persist_pipeline {
            snapshots.load_pipeline().unwrap_or_default()
        } else {
            WarehouseState::default()
        };
        state.rejected_orders.replace_all(snapshots.load_rejected_orders());

        tracing::info!(
            purchase_requests = state.purchase_requests.len(),
            inbound_registers = state.inbound_registers.len(),
            rejected_orders = state.rejected_orders.len(),
            "warehouse state loaded"
        );

        Coordinator {
            state,
            snapshots,
            persist_pipeline: config.persist_pipeline,
        }
    }

    /// Wrap an existing state without loading anything from `backend`
    pub fn with_state(state: WarehouseState, backend: S, config: &Config) -> Self {
        Coordinator {
            state,
            snapshots: SnapshotStore::new(backend, config),
            persist_pipeline: config.persist_pipeline,
        }
    }

    pub fn state(&self) -> &WarehouseState {
        &self.state
    }

    pub fn snapshots(&self) -> &SnapshotStore<S> {
        &self.snapshots
    }

    pub fn into_state(self) -> WarehouseState {
        self.state
    }

    pub fn list(&self, stage: Stage) -> Vec<Record> {
        self.state.list(stage)
    }

    pub fn get(&self, stage: Stage, id: &str) -> Result<Record> {
        self.state.get(stage, id)
    }

    /// Load reference data. Records whose natural key is already present are skipped.
    pub fn seed(&mut self, record: Record) -> InsertOutcome {
        let stage = record.stage();
        let outcome = self.state.insert_if_absent(record);
        if outcome.is_inserted() {
            self.persist(stage);
        }
        outcome
    }

    /// Open a new workflow instance.
    ///
    /// Opening the same `(purchaseRequestNumber, skuId)` twice returns the
    /// existing request unchanged.
    pub fn create_purchase_request(
        &mut self,
        mut input: NewPurchaseRequest,
        capability: &Capability,
    ) -> Result<PurchaseRequest> {
        capability.authorize(Stage::PurchaseRequest)?;

        let mut check = InputCheck::new(Stage::PurchaseRequest);
        input.purchase_request_number =
            check.text("purchaseRequestNumber", Some(&input.purchase_request_number));
        input.sku_id = check.text("skuId", Some(&input.sku_id));
        check.finish()?;

        let request = PurchaseRequest::open(input, capability.actor());
        match self.state.purchase_requests.insert_if_absent(request.clone()) {
            InsertOutcome::Inserted => {
                tracing::info!(
                    id = %request.meta.id,
                    key = %request.meta.natural_key(),
                    actor = capability.actor(),
                    "purchase request created"
                );
                self.persist(Stage::PurchaseRequest);
                Ok(request)
            }
            InsertOutcome::Duplicate { existing_id } => {
                tracing::debug!(existing_id = %existing_id, "purchase request already open");
                self.state.purchase_requests.require(&existing_id).cloned()
            }
        }
    }

    /// Patch raw fields of a non-terminal record. No derivation, no side effects.
    pub fn edit(
        &mut self,
        stage: Stage,
        id: &str,
        patch: &Value,
        capability: &Capability,
    ) -> Result<Record> {
        capability.authorize(stage)?;

        let current = self.state.get(stage, id)?;
        if stage == Stage::ArrivalInspection && self.is_rejected(id) {
            return Err(StockflowError::StateTransition(format!(
                "arrival inspection {} has been rejected and can no longer be edited",
                id
            )));
        }
        if current.is_terminal() {
            return Err(StockflowError::StateTransition(format!(
                "{} {} is {} and can no longer be edited",
                stage,
                id,
                current.status_label()
            )));
        }

        let fields = patch.as_object().ok_or_else(|| {
            StockflowError::SchemaValidation("edit patch must be a JSON object".to_string())
        })?;
        let editable = editable_fields(stage);
        let allowed: Map<String, Value> = fields
            .iter()
            .filter(|(key, _)| editable.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        if allowed.len() != fields.len() {
            tracing::debug!(stage = %stage, id, "non-editable fields dropped from edit patch");
        }

        let record = self.state.upsert_by_field(stage, id, &allowed, Utc::now())?;
        self.persist(stage);
        Ok(record)
    }

    /// Move a record one status forward. The promoted status is reserved for [`Coordinator::promote`].
    pub fn advance(&mut self, stage: Stage, id: &str, capability: &Capability) -> Result<Record> {
        capability.authorize(stage)?;

        let now = Utc::now();
        let state = &mut self.state;
        let record = match stage {
            Stage::PurchaseRequest => advance_in(&mut state.purchase_requests, id, now),
            Stage::ProductionSchedule => advance_in(&mut state.production_schedules, id, now),
            Stage::ArrivalInspection => advance_in(&mut state.arrival_inspections, id, now),
            Stage::InboundRegister => advance_in(&mut state.inbound_registers, id, now),
            Stage::QualityControl => advance_in(&mut state.quality_controls, id, now),
            Stage::Shipment => advance_in(&mut state.shipments, id, now),
            Stage::Inventory => advance_in(&mut state.inventory, id, now),
            Stage::RejectedOrder => advance_in(&mut state.rejected_orders, id, now),
        }?;

        tracing::info!(stage = %stage, id, status = %record.status_label(), "status advanced");
        self.persist(stage);
        Ok(record)
    }

    /// Promote a record into the next stage.
    ///
    /// Checks, in order: capability, existence, required inputs, positive
    /// values. On success the source takes its promoted status and the
    /// downstream record is inserted unless its natural key is already
    /// present. Promoting an already promoted record whose downstream
    /// record exists writes nothing and returns both as stored.
    pub fn promote(
        &mut self,
        stage: Stage,
        id: &str,
        capability: &Capability,
    ) -> Result<PromotionOutcome> {
        capability.authorize(stage)?;

        if stage == Stage::ArrivalInspection {
            self.state.arrival_inspections.require(id)?;
            if self.is_rejected(id) {
                return Err(StockflowError::StateTransition(format!(
                    "arrival inspection {} has been rejected",
                    id
                )));
            }
        }

        let now = Utc::now();
        let actor = capability.actor();
        let state = &mut self.state;
        let (outcome, written) = match stage {
            Stage::PurchaseRequest => promote_between(
                &mut state.purchase_requests,
                &mut state.production_schedules,
                id,
                actor,
                now,
            ),
            Stage::ProductionSchedule => promote_between(
                &mut state.production_schedules,
                &mut state.arrival_inspections,
                id,
                actor,
                now,
            ),
            Stage::ArrivalInspection => promote_between(
                &mut state.arrival_inspections,
                &mut state.inbound_registers,
                id,
                actor,
                now,
            ),
            Stage::InboundRegister => promote_between(
                &mut state.inbound_registers,
                &mut state.quality_controls,
                id,
                actor,
                now,
            ),
            Stage::QualityControl => promote_between(
                &mut state.quality_controls,
                &mut state.shipments,
                id,
                actor,
                now,
            ),
            Stage::Shipment => promote_between(
                &mut state.shipments,
                &mut state.inventory,
                id,
                actor,
                now,
            ),
            Stage::Inventory | Stage::RejectedOrder => {
                state.get(stage, id)?;
                Err(StockflowError::StateTransition(format!(
                    "{} records have no downstream stage",
                    stage
                )))
            }
        }?;

        if !written {
            tracing::debug!(stage = %stage, id, "already promoted, nothing written");
            return Ok(outcome);
        }
        if outcome.duplicate {
            tracing::debug!(
                stage = %stage,
                id,
                downstream = %outcome.downstream.id(),
                "downstream record already present, insert suppressed"
            );
        }
        tracing::info!(
            stage = %stage,
            id,
            downstream = %outcome.downstream.id(),
            actor,
            "record promoted"
        );

        self.persist(stage);
        Ok(outcome)
    }

    /// Move an arrival inspection into a rejected order.
    ///
    /// Append-only: the inspection and every other pipeline record stay
    /// untouched, but the inspection can no longer be edited, promoted or
    /// rejected again.
    pub fn reject(
        &mut self,
        inspection_id: &str,
        reason: &str,
        capability: &Capability,
    ) -> Result<RejectedOrder> {
        capability.authorize(Stage::ArrivalInspection)?;

        let inspection = self.state.arrival_inspections.require(inspection_id)?;

        let mut check = InputCheck::new(Stage::RejectedOrder);
        let reason = check.text("reason", Some(reason));
        check.finish()?;

        if self.is_rejected(inspection_id) {
            return Err(StockflowError::StateTransition(format!(
                "arrival inspection {} has already been rejected",
                inspection_id
            )));
        }
        if inspection.status.is_terminal() {
            return Err(StockflowError::StateTransition(format!(
                "arrival inspection {} is {} and can no longer be rejected",
                inspection_id, inspection.status
            )));
        }

        let now = Utc::now();
        let order = RejectedOrder {
            meta: inspection.meta.carry_into(Stage::RejectedOrder, now),
            status: RejectedStatus::Rejected,
            inspection_id: inspection_id.to_string(),
            expected_quantity: inspection.expected_quantity,
            arrived_quantity: inspection
                .arrived_quantity
                .as_ref()
                .and_then(|q| q.parse().ok()),
            reason,
            inspector: capability.actor().to_string(),
            rejected_at: now,
        };
        self.state.rejected_orders.insert(order.clone());

        tracing::info!(
            id = %order.meta.id,
            inspection_id,
            actor = capability.actor(),
            "arrival inspection rejected"
        );

        self.persist(Stage::RejectedOrder);
        Ok(order)
    }

    fn is_rejected(&self, inspection_id: &str) -> bool {
        self.state
            .rejected_orders
            .list()
            .iter()
            .any(|r| r.inspection_id == inspection_id)
    }

    /// Best-effort snapshot of whatever `stage` touched.
    fn persist(&self, stage: Stage) {
        let result = if stage == Stage::RejectedOrder {
            self.snapshots.save_rejected_orders(self.state.rejected_orders.list())
        } else if self.persist_pipeline {
            self.snapshots.save_pipeline(&self.state)
        } else {
            return;
        };

        if let Err(e) = result {
            tracing::warn!(
                stage = %stage,
                code = e.code(),
                error = %e,
                "snapshot save failed, in-memory state kept"
            );
        }
    }
}

fn advance_in<T: StageRecord>(store: &mut Store<T>, id: &str, now: DateTime<Utc>) -> Result<Record> {
    let next = advance_status(store.require(id)?, now)?;
    store.replace(next.clone())?;
    Ok(next.into_record())
}

/// Promote `id` from `source` into `target`.
///
/// Everything fallible runs before the first write, so a failure leaves
/// both stores untouched. The flag is false when nothing was written.
fn promote_between<P: Promotable>(
    source: &mut Store<P>,
    target: &mut Store<P::Next>,
    id: &str,
    actor: &str,
    now: DateTime<Utc>,
) -> Result<(PromotionOutcome, bool)> {
    let current = source.require(id)?;
    if current.status() == <P::Status as StatusFlow>::PROMOTED {
        if let Some(existing) = target.find_by_key(&current.natural_key()) {
            let outcome = PromotionOutcome {
                source: current.clone().into_record(),
                downstream: existing.clone().into_record(),
                duplicate: true,
            };
            return Ok((outcome, false));
        }
    }

    let promotion = current.promote(actor, now)?;

    source.replace(promotion.source.clone())?;
    let (downstream, duplicate) = match target.insert_if_absent(promotion.downstream.clone()) {
        InsertOutcome::Inserted => (promotion.downstream, false),
        InsertOutcome::Duplicate { existing_id } => {
            let existing = target.get(&existing_id).cloned();
            (existing.unwrap_or(promotion.downstream), true)
        }
    };

    let outcome = PromotionOutcome {
        source: promotion.source.into_record(),
        downstream: downstream.into_record(),
        duplicate,
    };
    Ok((outcome, true))
}
