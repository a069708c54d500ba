//! Thread-safe handle over a [`Coordinator`]

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::errors::Result;
use crate::schemas::{Record, RejectedOrder, Stage};
use crate::snapshot::KeyValueStore;
use crate::store::WarehouseState;

use super::capability::Capability;
use super::coordinator::{Coordinator, PromotionOutcome};

/// Cloneable handle that serializes every operation through one lock.
///
/// Concurrent promotions of the same record cannot both insert downstream:
/// the second one sees the first one's record under the lock.
#[derive(Debug)]
pub struct SharedCoordinator<S> {
    inner: Arc<Mutex<Coordinator<S>>>,
}

impl<S> Clone for SharedCoordinator<S> {
    fn clone(&self) -> Self {
        SharedCoordinator {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore> SharedCoordinator<S> {
    pub fn new(coordinator: Coordinator<S>) -> Self {
        SharedCoordinator {
            inner: Arc::new(Mutex::new(coordinator)),
        }
    }

    /// Run `f` with exclusive access to the coordinator
    pub fn with<R>(&self, f: impl FnOnce(&mut Coordinator<S>) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn promote(&self, stage: Stage, id: &str, capability: &Capability) -> Result<PromotionOutcome> {
        self.with(|c| c.promote(stage, id, capability))
    }

    pub fn reject(&self, inspection_id: &str, reason: &str, capability: &Capability) -> Result<RejectedOrder> {
        self.with(|c| c.reject(inspection_id, reason, capability))
    }

    pub fn edit(&self, stage: Stage, id: &str, patch: &Value, capability: &Capability) -> Result<Record> {
        self.with(|c| c.edit(stage, id, patch, capability))
    }

    pub fn advance(&self, stage: Stage, id: &str, capability: &Capability) -> Result<Record> {
        self.with(|c| c.advance(stage, id, capability))
    }

    pub fn list(&self, stage: Stage) -> Vec<Record> {
        self.lock().list(stage)
    }

    pub fn get(&self, stage: Stage, id: &str) -> Result<Record> {
        self.lock().get(stage, id)
    }

    /// Point-in-time copy of every store
    pub fn snapshot(&self) -> WarehouseState {
        self.lock().state().clone()
    }

    // Operations never leave the state half-written, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Coordinator<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
