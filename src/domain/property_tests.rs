//! Property-based tests for domain logic
//!
//! These tests use proptest to verify invariants across many random inputs.

#[cfg(test)]
mod tests {
    use crate::domain::fixtures::filled_inbound;
    use crate::domain::{advance_status, derive, Promotable, StatusFlow};
    use crate::errors::StockflowError;
    use crate::schemas::{
        InboundRegisterRecord, PackagingInputs, ProductionSchedule, ProductionStatus,
        QualityStatus, RawInput, RawInputError, ShipmentStatus,
    };
    use chrono::Utc;
    use proptest::prelude::*;

    // ===== STRATEGY HELPERS =====

    /// Strictly positive measurement
    fn positive() -> impl Strategy<Value = f64> {
        0.001f64..10_000.0
    }

    fn any_packaging() -> impl Strategy<Value = PackagingInputs> {
        (
            positive(),
            positive(),
            positive(),
            (positive(), positive(), positive()),
            positive(),
        )
            .prop_map(|(package_count, total_pieces, pieces_per_unit, (l, w, h), unit_weight)| {
                PackagingInputs {
                    package_count,
                    total_pieces,
                    pieces_per_unit,
                    box_length: l,
                    box_width: w,
                    box_height: h,
                    unit_weight,
                }
            })
    }

    /// A raw input that may be missing, blank, zero, negative, garbage or fine
    fn any_raw_input() -> impl Strategy<Value = Option<RawInput>> {
        prop_oneof![
            Just(None),
            Just(Some(RawInput::from(""))),
            Just(Some(RawInput::Number(0.0))),
            Just(Some(RawInput::from("n/a"))),
            (-1000.0f64..-0.001).prop_map(|v| Some(RawInput::Number(v))),
            positive().prop_map(|v| Some(RawInput::Number(v))),
            positive().prop_map(|v| Some(RawInput::Text(v.to_string()))),
        ]
    }

    fn any_inbound() -> impl Strategy<Value = InboundRegisterRecord> {
        prop::collection::vec(any_raw_input(), 7).prop_map(|inputs| {
            let mut record = filled_inbound("IR-prop");
            record.package_count = inputs[0].clone();
            record.total_pieces = inputs[1].clone();
            record.pieces_per_unit = inputs[2].clone();
            record.box_length = inputs[3].clone();
            record.box_width = inputs[4].clone();
            record.box_height = inputs[5].clone();
            record.unit_weight = inputs[6].clone();
            record
        })
    }

    fn usable(input: &Option<RawInput>) -> bool {
        matches!(input.as_ref().map(RawInput::parse), Some(Ok(v)) if v > 0.0 && v.is_finite())
    }

    fn missing(input: &Option<RawInput>) -> bool {
        match input {
            None => true,
            Some(raw) => match raw.parse() {
                Ok(v) => v == 0.0,
                Err(e) => e == RawInputError::Blank,
            },
        }
    }

    fn raw_fields(record: &InboundRegisterRecord) -> [&Option<RawInput>; 7] {
        [
            &record.package_count,
            &record.total_pieces,
            &record.pieces_per_unit,
            &record.box_length,
            &record.box_width,
            &record.box_height,
            &record.unit_weight,
        ]
    }

    // ===== DERIVATION PROPERTIES =====

    proptest! {
        /// Property: derived quantities follow the documented formulas
        #[test]
        fn test_derive_matches_formulas(inputs in any_packaging()) {
            let derived = derive(&inputs);
            let box_volume = inputs.box_length * inputs.box_width * inputs.box_height / 1_000_000.0;
            prop_assert!((derived.box_volume_m3 - box_volume).abs() <= box_volume * 1e-12);
            prop_assert_eq!(derived.total_volume_m3, inputs.total_pieces * derived.box_volume_m3);
            prop_assert_eq!(derived.total_weight_kg, inputs.total_pieces * inputs.unit_weight);
            prop_assert_eq!(derived.total_quantity, inputs.total_pieces * inputs.pieces_per_unit);
        }

        /// Property: positive inputs never produce non-positive derivations
        #[test]
        fn test_derive_is_positive(inputs in any_packaging()) {
            let derived = derive(&inputs);
            prop_assert!(derived.total_quantity > 0.0);
            prop_assert!(derived.box_volume_m3 > 0.0);
            prop_assert!(derived.total_volume_m3 > 0.0);
            prop_assert!(derived.total_weight_kg > 0.0);
        }
    }

    // ===== PROMOTION PROPERTIES =====

    proptest! {
        /// Property: promote never mutates its input
        #[test]
        fn test_promote_never_mutates(record in any_inbound()) {
            let original = record.clone();
            let _ = record.promote("prop", Utc::now());
            prop_assert_eq!(record, original);
        }

        /// Property: promotion succeeds exactly when every raw input is usable
        #[test]
        fn test_promote_succeeds_iff_inputs_usable(record in any_inbound()) {
            let all_usable = raw_fields(&record).iter().all(|input| usable(input));
            let result = record.promote("prop", Utc::now());
            prop_assert_eq!(result.is_ok(), all_usable);

            if let Ok(promotion) = result {
                prop_assert!(promotion.source.derived.is_some());
                prop_assert_eq!(promotion.source.derived, Some(promotion.downstream.derived));
                prop_assert_eq!(promotion.downstream.meta.natural_key(), record.meta.natural_key());
            }
        }

        /// Property: every missing field is named, not just the first
        #[test]
        fn test_incomplete_input_names_every_missing_field(record in any_inbound()) {
            let names = ["packageCount", "totalPieces", "piecesPerUnit", "boxLength", "boxWidth", "boxHeight", "unitWeight"];
            let expected: Vec<&str> = names
                .iter()
                .zip(raw_fields(&record))
                .filter(|(_, input)| missing(input))
                .map(|(name, _)| *name)
                .collect();

            match record.promote("prop", Utc::now()) {
                Err(StockflowError::IncompleteInput { fields, .. }) => prop_assert_eq!(fields, expected),
                _ => prop_assert!(expected.is_empty()),
            }
        }
    }

    // ===== STATUS FLOW PROPERTIES =====

    fn any_production_status() -> impl Strategy<Value = ProductionStatus> {
        prop_oneof![
            Just(ProductionStatus::Pending),
            Just(ProductionStatus::Scheduled),
            Just(ProductionStatus::InProduction),
            Just(ProductionStatus::Completed),
        ]
    }

    proptest! {
        /// Property: status only moves forward, one step at a time
        #[test]
        fn test_advance_moves_forward_one_step(status in any_production_status()) {
            let mut schedule = ProductionSchedule::new(filled_inbound("x").meta, 10.0);
            schedule.status = status;
            if let Ok(next) = advance_status(&schedule, Utc::now()) {
                prop_assert_eq!(next.status.index(), status.index() + 1);
                prop_assert_ne!(next.status, ProductionStatus::PROMOTED);
                prop_assert!(next.meta.updated_at >= schedule.meta.updated_at);
                prop_assert_eq!(next.meta.created_at, schedule.meta.created_at);
            }
        }

        /// Property: repeated advancing always stops short of the promoted status
        #[test]
        fn test_advance_never_reaches_promoted(steps in 0usize..10) {
            let mut schedule = ProductionSchedule::new(filled_inbound("x").meta, 10.0);
            for _ in 0..steps {
                match advance_status(&schedule, Utc::now()) {
                    Ok(next) => schedule = next,
                    Err(_) => break,
                }
            }
            prop_assert_ne!(schedule.status, ProductionStatus::Completed);
        }
    }

    #[test]
    fn test_sequences_are_strictly_ordered() {
        for window in QualityStatus::SEQUENCE.windows(2) {
            assert!(window[0].precedes(window[1]));
        }
        for window in ShipmentStatus::SEQUENCE.windows(2) {
            assert!(window[0].precedes(window[1]));
        }
    }
}
