//! Error types for stockflow
//!
//! Each error type has a corresponding error code for programmatic handling.

use thiserror::Error;

use crate::schemas::Stage;

/// Result type alias for stockflow operations
pub type Result<T> = std::result::Result<T, StockflowError>;

/// Main error type for all stockflow operations
#[derive(Debug, Error)]
pub enum StockflowError {
    /// The actor's capability does not grant mutation rights for the stage
    #[error("Forbidden: {actor} may not mutate {stage} records")]
    Forbidden { actor: String, stage: Stage },

    /// Referenced record id is absent from the stage store
    #[error("Not found: {stage} record {id}")]
    NotFound { stage: Stage, id: String },

    /// One or more required fields are empty or zero
    #[error("Incomplete input for {stage}: missing {}", fields.join(", "))]
    IncompleteInput { stage: Stage, fields: Vec<String> },

    /// Numeric field present but not a strictly positive number
    #[error("Invalid value for {stage}: {}", fields.join(", "))]
    InvalidValue { stage: Stage, fields: Vec<String> },

    /// Snapshot could not be written; in-memory state stays authoritative
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    /// Workflow status transition error
    #[error("State transition error: {0}")]
    StateTransition(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// JSON was well-formed but did not match the record shape
    #[error("Schema validation failed: {0}")]
    SchemaValidation(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// No `.stockflow` directory above the starting path
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error with context
    #[error("{context}: {message}")]
    Wrapped { context: String, message: String },
}

impl StockflowError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            StockflowError::Forbidden { .. } => "FORBIDDEN",
            StockflowError::NotFound { .. } => "NOT_FOUND",
            StockflowError::IncompleteInput { .. } => "INCOMPLETE_INPUT",
            StockflowError::InvalidValue { .. } => "INVALID_VALUE",
            StockflowError::PersistenceFailure(_) => "PERSISTENCE_FAILURE",
            StockflowError::StateTransition(_) => "STATE_TRANSITION",
            StockflowError::InvalidJson(_) => "INVALID_JSON",
            StockflowError::SchemaValidation(_) => "SCHEMA_VALIDATION",
            StockflowError::FileNotFound(_) => "FILE_NOT_FOUND",
            StockflowError::ConfigError(_) => "CONFIG_ERROR",
            StockflowError::ProjectNotFound(_) => "PROJECT_NOT_FOUND",
            StockflowError::Io(_) => "IO_ERROR",
            StockflowError::Wrapped { .. } => "WRAPPED_ERROR",
        }
    }

    /// Wrap an error with additional context
    pub fn wrap<E: std::fmt::Display>(error: E, context: impl Into<String>) -> Self {
        StockflowError::Wrapped {
            context: context.into(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let forbidden = StockflowError::Forbidden {
            actor: "guest".into(),
            stage: Stage::InboundRegister,
        };
        assert_eq!(forbidden.code(), "FORBIDDEN");
        let not_found = StockflowError::NotFound {
            stage: Stage::Shipment,
            id: "SHP-1".into(),
        };
        assert_eq!(not_found.code(), "NOT_FOUND");
        assert_eq!(StockflowError::PersistenceFailure("disk".into()).code(), "PERSISTENCE_FAILURE");
        assert_eq!(StockflowError::StateTransition("test".into()).code(), "STATE_TRANSITION");
        assert_eq!(StockflowError::InvalidJson("test".into()).code(), "INVALID_JSON");
        assert_eq!(StockflowError::SchemaValidation("test".into()).code(), "SCHEMA_VALIDATION");
        assert_eq!(StockflowError::ConfigError("test".into()).code(), "CONFIG_ERROR");
        assert_eq!(StockflowError::ProjectNotFound("test".into()).code(), "PROJECT_NOT_FOUND");
    }

    #[test]
    fn test_incomplete_input_lists_every_field() {
        let err = StockflowError::IncompleteInput {
            stage: Stage::InboundRegister,
            fields: vec!["totalPieces".into(), "boxWidth".into()],
        };
        let message = err.to_string();
        assert!(message.contains("inbound_register"));
        assert!(message.contains("totalPieces, boxWidth"));
    }

    #[test]
    fn test_wrap_error() {
        let wrapped = StockflowError::wrap("inner error", "outer context");
        assert_eq!(wrapped.code(), "WRAPPED_ERROR");
        assert!(wrapped.to_string().contains("outer context"));
        assert!(wrapped.to_string().contains("inner error"));
    }
}
