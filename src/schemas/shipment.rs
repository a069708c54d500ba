//! Shipment schema

use serde::{Deserialize, Serialize};

use super::meta::{RecordMeta, Sku};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    Preparing,
    Shipped,
    InTransit,
    Delivered,
}

impl std::fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShipmentStatus::Preparing => write!(f, "preparing"),
            ShipmentStatus::Shipped => write!(f, "shipped"),
            ShipmentStatus::InTransit => write!(f, "in_transit"),
            ShipmentStatus::Delivered => write!(f, "delivered"),
        }
    }
}

/// One line of a shipment's item list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentItem {
    pub sku_id: String,
    pub sku: Sku,
    pub quantity: f64,
    pub total_volume: f64,
    pub total_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    #[serde(flatten)]
    pub meta: RecordMeta,

    pub status: ShipmentStatus,

    pub quality_control_id: String,

    pub container_number: String,

    pub destination: String,

    pub items: Vec<ShipmentItem>,

    #[serde(default)]
    pub departure_date: Option<String>,

    #[serde(default)]
    pub arrival_date: Option<String>,

    #[serde(default)]
    pub delivered_by: Option<String>,
}

impl Shipment {
    /// Items list quantity summed over every line
    pub fn total_quantity(&self) -> f64 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn total_volume(&self) -> f64 {
        self.items.iter().map(|item| item.total_volume).sum()
    }

    pub fn total_weight(&self) -> f64 {
        self.items.iter().map(|item| item.total_weight).sum()
    }
}
