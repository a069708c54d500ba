//! Rejected order schema - append-only exception sink

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::meta::RecordMeta;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectedStatus {
    Rejected,
}

impl std::fmt::Display for RejectedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectedStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedOrder {
    #[serde(flatten)]
    pub meta: RecordMeta,

    pub status: RejectedStatus,

    /// Arrival inspection the rejection was raised from
    pub inspection_id: String,

    pub expected_quantity: f64,

    /// Staged arrived quantity at the time of rejection, if any was entered
    #[serde(default)]
    pub arrived_quantity: Option<f64>,

    pub reason: String,

    pub inspector: String,

    pub rejected_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::Sku;

    #[test]
    fn test_rejected_order_json_round_trip() {
        let meta = RecordMeta::new("RJ-1", "PR-7", "SKU-3", Sku::new("B-3", "Bolt", "hardware"));
        let rejected_at = meta.created_at;
        let order = RejectedOrder {
            meta,
            status: RejectedStatus::Rejected,
            inspection_id: "AI-4".to_string(),
            expected_quantity: 40.0,
            arrived_quantity: Some(12.0),
            reason: "crushed cartons".to_string(),
            inspector: "dana".to_string(),
            rejected_at,
        };

        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains("\"inspectionId\":\"AI-4\""));
        let parsed: RejectedOrder = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, order);
    }
}
