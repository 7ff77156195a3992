//! Error types for the tabular analysis core.
//!
//! The analysis functions in this crate are deliberately total: unparseable
//! cells are excluded from aggregates and under-populated columns simply
//! produce no output. The only conditions surfaced as errors are invalid
//! configuration values and structurally malformed input rows.
//!
//! Errors are serializable so a host application can forward them to a
//! frontend for display.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the analysis core.
#[derive(Error, Debug)]
pub enum InsightError {
    /// Invalid configuration provided (e.g. an unrecognized fill method).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Input rows are not associative records of column name to cell.
    #[error("Malformed row data: {0}")]
    MalformedRow(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl InsightError {
    /// Get a stable error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::MalformedRow(_) => "MALFORMED_ROW",
            Self::Json(_) => "JSON_ERROR",
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields,
/// making them easy to handle in a frontend.
impl Serialize for InsightError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("InsightError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, InsightError>;
