//! Derivation engine
//!
//! Pure functions computing dependent quantities from packaging inputs.

use crate::schemas::{staged_value, Derivations, InboundRegisterRecord, PackagingInputs};

const CUBIC_CM_PER_CUBIC_M: f64 = 1_000_000.0;

pub fn total_quantity(total_pieces: f64, pieces_per_unit: f64) -> f64 {
    total_pieces * pieces_per_unit
}

/// Volume of one box in cubic metres from centimetre dimensions
pub fn box_volume_m3(length_cm: f64, width_cm: f64, height_cm: f64) -> f64 {
    (length_cm * width_cm * height_cm) / CUBIC_CM_PER_CUBIC_M
}

pub fn total_volume_m3(total_pieces: f64, box_volume_m3: f64) -> f64 {
    total_pieces * box_volume_m3
}

pub fn total_weight_kg(total_pieces: f64, unit_weight_kg: f64) -> f64 {
    total_pieces * unit_weight_kg
}

/// Compute the full derivation set.
pub fn derive(inputs: &PackagingInputs) -> Derivations {
    let box_volume = box_volume_m3(inputs.box_length, inputs.box_width, inputs.box_height);
    Derivations {
        total_quantity: total_quantity(inputs.total_pieces, inputs.pieces_per_unit),
        box_volume_m3: box_volume,
        total_volume_m3: total_volume_m3(inputs.total_pieces, box_volume),
        total_weight_kg: total_weight_kg(inputs.total_pieces, inputs.unit_weight),
    }
}

/// Packaging inputs coerced for live editing: unparsable or absent values read as 0.
pub fn staged_inputs(record: &InboundRegisterRecord) -> PackagingInputs {
    PackagingInputs {
        package_count: staged_value(record.package_count.as_ref()),
        total_pieces: staged_value(record.total_pieces.as_ref()),
        pieces_per_unit: staged_value(record.pieces_per_unit.as_ref()),
        box_length: staged_value(record.box_length.as_ref()),
        box_width: staged_value(record.box_width.as_ref()),
        box_height: staged_value(record.box_height.as_ref()),
        unit_weight: staged_value(record.unit_weight.as_ref()),
    }
}

/// Preview of what promotion would derive. Never stored on the record.
pub fn staged_derivations(record: &InboundRegisterRecord) -> Derivations {
    derive(&staged_inputs(record))
}
