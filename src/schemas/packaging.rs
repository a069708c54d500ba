//! Packaging measurements and the quantities derived from them

use serde::{Deserialize, Serialize};

/// Validated packaging inputs. Every value is strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagingInputs {
    pub package_count: f64,
    pub total_pieces: f64,
    pub pieces_per_unit: f64,
    /// Centimetres
    pub box_length: f64,
    /// Centimetres
    pub box_width: f64,
    /// Centimetres
    pub box_height: f64,
    /// Kilograms
    pub unit_weight: f64,
}

/// Quantities computed from [`PackagingInputs`] at promotion time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Derivations {
    pub total_quantity: f64,
    /// Cubic metres
    #[serde(rename = "boxVolume")]
    pub box_volume_m3: f64,
    /// Cubic metres
    #[serde(rename = "totalVolume")]
    pub total_volume_m3: f64,
    /// Kilograms
    #[serde(rename = "totalWeight")]
    pub total_weight_kg: f64,
}
