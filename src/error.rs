//! Error types for the criteria engine
//!
//! Evaluation itself never fails; these errors come from the strict tree
//! builder, name-table configuration, and the Python host surface.

use thiserror::Error;

/// Main error type for the criteria engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CriteriaError {
    #[error("Operator {operator} at position {position} needs {required} operand(s), found {available}")]
    MissingOperands {
        operator: &'static str,
        position: usize,
        required: usize,
        available: usize,
    },

    #[error("Expression left {count} un-combined operands on the stack")]
    TrailingOperands { count: usize },

    #[error("Expression nesting depth {depth} at position {position} exceeds the limit of {limit}")]
    TooDeep {
        depth: usize,
        position: usize,
        limit: usize,
    },

    #[error("Invalid name table: {0}")]
    InvalidNameTable(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Name tables not initialized. Call init_names() first.")]
    NotInitialized,
}

impl From<serde_json::Error> for CriteriaError {
    fn from(err: serde_json::Error) -> Self {
        CriteriaError::Deserialization(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<CriteriaError> for pyo3::PyErr {
    fn from(err: CriteriaError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyRuntimeError, PyValueError};

        match err {
            CriteriaError::NotInitialized => PyRuntimeError::new_err(err.to_string()),
            CriteriaError::MissingOperands { .. }
            | CriteriaError::TrailingOperands { .. }
            | CriteriaError::TooDeep { .. }
            | CriteriaError::InvalidNameTable(_)
            | CriteriaError::Deserialization(_) => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Result type alias for the criteria engine
pub type Result<T> = std::result::Result<T, CriteriaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_operands_message() {
        let err = CriteriaError::MissingOperands {
            operator: "AND",
            position: 0,
            required: 2,
            available: 0,
        };
        assert_eq!(
            err.to_string(),
            "Operator AND at position 0 needs 2 operand(s), found 0"
        );
    }

    #[test]
    fn test_too_deep_message() {
        let err = CriteriaError::TooDeep {
            depth: 257,
            position: 512,
            limit: 256,
        };
        assert_eq!(
            err.to_string(),
            "Expression nesting depth 257 at position 512 exceeds the limit of 256"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CriteriaError::from(json_err);
        assert!(matches!(err, CriteriaError::Deserialization(_)));
    }
}
