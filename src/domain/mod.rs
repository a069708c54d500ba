//! Domain logic for stage statuses, validation, derivation and transitions

mod derivation;
mod states;
mod transitions;
mod validation;

// Property-based tests (compiled only in test builds)
#[cfg(test)]
mod property_tests;

pub use derivation::{
    box_volume_m3, derive, staged_derivations, staged_inputs, total_quantity, total_volume_m3,
    total_weight_kg,
};
pub use states::StatusFlow;
pub use transitions::{advance_status, Promotable, Promotion};
pub use validation::{
    validate_advance, validate_promotion, InputCheck, ValidationResult,
};

#[cfg(test)]
pub(crate) use transitions::fixtures;
