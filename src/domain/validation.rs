//! Validation rules for promotions and status changes

use crate::errors::{Result, StockflowError};
use crate::schemas::{RawInput, RawInputError, Stage};

use super::states::StatusFlow;

/// Result of a validation check
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the validation passed
    pub valid: bool,

    /// Reason for failure (if valid is false)
    pub reason: Option<String>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        ValidationResult {
            valid: true,
            reason: None,
        }
    }

    /// Create a failed validation result
    pub fn failure(reason: impl Into<String>) -> Self {
        ValidationResult {
            valid: false,
            reason: Some(reason.into()),
        }
    }

    /// Convert into a `StateTransition` error when invalid
    pub fn into_result(self) -> Result<()> {
        if self.valid {
            return Ok(());
        }
        Err(StockflowError::StateTransition(
            self.reason.unwrap_or_else(|| "Transition validation failed".to_string()),
        ))
    }
}

/// Validate a manual one-step status change.
///
/// Only the immediate next status is allowed, and the promoted status is
/// reserved for promotion so a record can never look completed without its
/// downstream counterpart.
pub fn validate_advance<S: StatusFlow>(current: S, target: S) -> ValidationResult {
    if current.next() != Some(target) {
        return ValidationResult::failure(format!(
            "cannot transition from {} to {}",
            current, target
        ));
    }
    if target == S::PROMOTED {
        return ValidationResult::failure(format!("{} is only reachable by promotion", target));
    }
    ValidationResult::success()
}

/// Validate that a record in `current` may be promoted.
///
/// Re-promoting an already promoted record is allowed; any other terminal
/// status (e.g. a rejected inspection) is not.
pub fn validate_promotion<S: StatusFlow>(current: S) -> ValidationResult {
    if current == S::PROMOTED || !current.is_terminal() {
        return ValidationResult::success();
    }
    ValidationResult::failure(format!("cannot promote a record in terminal status {}", current))
}

/// Collects every missing and invalid required field before reporting.
///
/// Missing fields win: if anything is missing the check fails with
/// `IncompleteInput` even when other fields are also invalid.
#[derive(Debug)]
pub struct InputCheck {
    stage: Stage,
    missing: Vec<String>,
    invalid: Vec<String>,
}

impl InputCheck {
    pub fn new(stage: Stage) -> Self {
        InputCheck {
            stage,
            missing: Vec::new(),
            invalid: Vec::new(),
        }
    }

    /// Check a raw numeric input, returning its value (0.0 when it failed).
    pub fn number(&mut self, field: &str, input: Option<&RawInput>) -> f64 {
        match input.map(RawInput::parse) {
            None | Some(Err(RawInputError::Blank)) => {
                self.missing.push(field.to_string());
                0.0
            }
            Some(Err(RawInputError::NotNumeric)) => {
                self.invalid.push(format!("{} is not a number", field));
                0.0
            }
            Some(Ok(value)) => self.quantity(field, value),
        }
    }

    /// Check an already-numeric carried value.
    pub fn quantity(&mut self, field: &str, value: f64) -> f64 {
        if value == 0.0 {
            self.missing.push(field.to_string());
            return 0.0;
        }
        if !value.is_finite() || value < 0.0 {
            self.invalid.push(format!("{} must be greater than zero (got {})", field, value));
            return 0.0;
        }
        value
    }

    /// Check a required text field, returning it trimmed.
    pub fn text(&mut self, field: &str, input: Option<&str>) -> String {
        match input.map(str::trim) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => {
                self.missing.push(field.to_string());
                String::new()
            }
        }
    }

    /// Names of fields recorded as missing so far
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    pub fn finish(self) -> Result<()> {
        if !self.missing.is_empty() {
            return Err(StockflowError::IncompleteInput {
                stage: self.stage,
                fields: self.missing,
            });
        }
        if !self.invalid.is_empty() {
            return Err(StockflowError::InvalidValue {
                stage: self.stage,
                fields: self.invalid,
            });
        }
        Ok(())
    }
}
