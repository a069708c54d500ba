//! Inbound register schema - raw packaging inputs awaiting promotion

use serde::{Deserialize, Serialize};

use super::meta::RecordMeta;
use super::packaging::Derivations;
use super::raw::RawInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InboundStatus {
    Pending,
    Completed,
}

impl std::fmt::Display for InboundStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InboundStatus::Pending => write!(f, "pending"),
            InboundStatus::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundRegisterRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,

    pub status: InboundStatus,

    pub expected_quantity: f64,

    /// Arrived quantity as accepted at inspection
    pub received_quantity: f64,

    #[serde(default)]
    pub package_count: Option<RawInput>,

    #[serde(default)]
    pub total_pieces: Option<RawInput>,

    #[serde(default)]
    pub pieces_per_unit: Option<RawInput>,

    /// Centimetres
    #[serde(default)]
    pub box_length: Option<RawInput>,

    /// Centimetres
    #[serde(default)]
    pub box_width: Option<RawInput>,

    /// Centimetres
    #[serde(default)]
    pub box_height: Option<RawInput>,

    /// Kilograms
    #[serde(default)]
    pub unit_weight: Option<RawInput>,

    /// Absent until promotion
    #[serde(default)]
    pub derived: Option<Derivations>,

    #[serde(default)]
    pub completed_by: Option<String>,
}

impl InboundRegisterRecord {
    pub fn new(meta: RecordMeta, expected_quantity: f64, received_quantity: f64) -> Self {
        InboundRegisterRecord {
            meta,
            status: InboundStatus::Pending,
            expected_quantity,
            received_quantity,
            package_count: None,
            total_pieces: None,
            pieces_per_unit: None,
            box_length: None,
            box_width: None,
            box_height: None,
            unit_weight: None,
            derived: None,
            completed_by: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::Sku;

    #[test]
    fn test_pending_record_has_no_derivations() {
        let meta = RecordMeta::new("IR-1", "PR-1", "SKU-1", Sku::new("C", "Crate", "misc"));
        let record = InboundRegisterRecord::new(meta, 100.0, 98.0);

        let json = serde_json::to_value(&record).unwrap();
        assert!(json["derived"].is_null());
        assert!(json["totalPieces"].is_null());
        assert_eq!(json["receivedQuantity"], 98.0);
    }

    #[test]
    fn test_raw_fields_accept_text_from_patches() {
        let json = r#"{
            "id": "IR-1", "purchaseRequestNumber": "PR-1", "skuId": "SKU-1",
            "sku": {"code": "C", "name": "Crate", "category": "misc"},
            "createdAt": "2024-05-01T08:00:00Z", "updatedAt": "2024-05-01T08:00:00Z",
            "status": "pending", "expectedQuantity": 10, "receivedQuantity": 10,
            "totalPieces": "10", "boxLength": 30
        }"#;
        let record: InboundRegisterRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.total_pieces, Some(RawInput::Text("10".to_string())));
        assert_eq!(record.box_length, Some(RawInput::Number(30.0)));
        assert!(record.unit_weight.is_none());
    }
}
