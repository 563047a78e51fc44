//! Error types for analytics operations.

use thiserror::Error;

/// Result type for analytics operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while parsing or analyzing academic data.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A delimited field could not be parsed as a number.
    #[error("Invalid number in {field}: {input:?}")]
    InvalidNumber {
        /// Field the value came from.
        field: &'static str,
        /// Offending token.
        input: String,
    },

    /// Parallel inputs have different lengths.
    #[error("Length mismatch: {field} has {actual} entries, expected {expected}")]
    LengthMismatch {
        /// Field whose length differs.
        field: &'static str,
        /// Expected number of entries.
        expected: usize,
        /// Actual number of entries.
        actual: usize,
    },

    /// A required input was empty.
    #[error("No values supplied for {0}")]
    EmptyInput(&'static str),

    /// TWA outside the 1.00-5.00 grading scale.
    #[error("TWA must be between 1.00 and 5.00, got {0}")]
    TwaOutOfRange(f64),

    /// Unknown grade format identifier.
    #[error("Unknown grade format: {0}")]
    UnknownFormat(String),

    /// Scene serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
