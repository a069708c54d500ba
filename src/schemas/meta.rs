//! Fields shared by every stage record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::stage::{new_record_id, Stage};

/// Immutable SKU reference data embedded in each record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sku {
    pub code: String,
    pub name: String,
    pub category: String,
}

impl Sku {
    pub fn new(code: impl Into<String>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Sku {
            code: code.into(),
            name: name.into(),
            category: category.into(),
        }
    }
}

/// `(purchaseRequestNumber, skuId)`: identifies one workflow instance within a stage
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NaturalKey {
    pub purchase_request_number: String,
    pub sku_id: String,
}

impl std::fmt::Display for NaturalKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.purchase_request_number, self.sku_id)
    }
}

/// Common record header, flattened into every stage record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMeta {
    /// Opaque unique identifier
    pub id: String,

    /// Business key threading the record through every stage
    pub purchase_request_number: String,

    pub sku_id: String,

    pub sku: Sku,

    /// Set once at creation
    pub created_at: DateTime<Utc>,

    /// Refreshed on every mutation, never moves backwards
    pub updated_at: DateTime<Utc>,
}

impl RecordMeta {
    /// Create a header with both timestamps set to now
    pub fn new(
        id: impl Into<String>,
        purchase_request_number: impl Into<String>,
        sku_id: impl Into<String>,
        sku: Sku,
    ) -> Self {
        let now = Utc::now();
        RecordMeta {
            id: id.into(),
            purchase_request_number: purchase_request_number.into(),
            sku_id: sku_id.into(),
            sku,
            created_at: now,
            updated_at: now,
        }
    }

    /// Header for a record synthesized in `stage` from this one: fresh id,
    /// same workflow instance, timestamps at `now`.
    pub fn carry_into(&self, stage: Stage, now: DateTime<Utc>) -> Self {
        RecordMeta {
            id: new_record_id(stage),
            purchase_request_number: self.purchase_request_number.clone(),
            sku_id: self.sku_id.clone(),
            sku: self.sku.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn natural_key(&self) -> NaturalKey {
        NaturalKey {
            purchase_request_number: self.purchase_request_number.clone(),
            sku_id: self.sku_id.clone(),
        }
    }

    /// Stamp `updated_at`, keeping it monotonic when the clock steps back.
    pub fn touch_at(&mut self, now: DateTime<Utc>) {
        if now > self.updated_at {
            self.updated_at = now;
        }
    }
}
