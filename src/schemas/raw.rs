//! Raw numeric inputs as typed by an operator

use serde::{Deserialize, Serialize};

/// A raw numeric field: either a JSON number or the text an operator typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInput {
    Number(f64),
    Text(String),
}

/// Why a raw input has no usable numeric value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInputError {
    /// Empty or whitespace-only text
    Blank,
    /// Text that does not parse as a floating point number
    NotNumeric,
}

impl RawInput {
    /// Exact numeric value, used for promotion.
    pub fn parse(&self) -> Result<f64, RawInputError> {
        match self {
            RawInput::Number(value) => Ok(*value),
            RawInput::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(RawInputError::Blank);
                }
                trimmed.parse::<f64>().map_err(|_| RawInputError::NotNumeric)
            }
        }
    }

    /// Lenient value for live-edit previews; anything unparsable reads as 0.
    pub fn staged(&self) -> f64 {
        self.parse().unwrap_or(0.0)
    }
}

impl From<f64> for RawInput {
    fn from(value: f64) -> Self {
        RawInput::Number(value)
    }
}

impl From<&str> for RawInput {
    fn from(value: &str) -> Self {
        RawInput::Text(value.to_string())
    }
}

/// Staged value of an optional raw input
pub fn staged_value(input: Option<&RawInput>) -> f64 {
    input.map(RawInput::staged).unwrap_or(0.0)
}
