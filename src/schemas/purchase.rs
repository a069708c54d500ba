//! Purchase request schema - root of every workflow instance

use serde::{Deserialize, Serialize};

use super::meta::{RecordMeta, Sku};
use super::raw::RawInput;
use super::stage::{new_record_id, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseRequestStatus {
    Pending,
    /// Approved and handed to production scheduling
    Approved,
}

impl std::fmt::Display for PurchaseRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PurchaseRequestStatus::Pending => write!(f, "pending"),
            PurchaseRequestStatus::Approved => write!(f, "approved"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    #[serde(flatten)]
    pub meta: RecordMeta,

    pub status: PurchaseRequestStatus,

    /// Ordered quantity
    #[serde(default)]
    pub quantity: Option<RawInput>,

    #[serde(default)]
    pub supplier: Option<String>,

    #[serde(default)]
    pub requested_by: Option<String>,

    /// Actor who promoted the request
    #[serde(default)]
    pub approved_by: Option<String>,
}

/// Input for opening a new purchase request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPurchaseRequest {
    pub purchase_request_number: String,
    pub sku_id: String,
    pub sku: Sku,
    #[serde(default)]
    pub quantity: Option<RawInput>,
    #[serde(default)]
    pub supplier: Option<String>,
}

impl PurchaseRequest {
    pub fn new(meta: RecordMeta) -> Self {
        PurchaseRequest {
            meta,
            status: PurchaseRequestStatus::Pending,
            quantity: None,
            supplier: None,
            requested_by: None,
            approved_by: None,
        }
    }

    /// Build a pending request from user input, stamped with the requesting actor
    pub fn open(input: NewPurchaseRequest, requested_by: &str) -> Self {
        let meta = RecordMeta::new(
            new_record_id(Stage::PurchaseRequest),
            input.purchase_request_number,
            input.sku_id,
            input.sku,
        );
        PurchaseRequest {
            quantity: input.quantity,
            supplier: input.supplier,
            requested_by: Some(requested_by.to_string()),
            ..PurchaseRequest::new(meta)
        }
    }
}
