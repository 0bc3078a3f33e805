//! Unified error types for trip feature computation.
//!
//! Every feature function fails fast: the first bad column, cell, or
//! projection aborts the call and the error is propagated to the caller
//! unchanged. Columns written before the failure remain in the table, so
//! callers must not assume atomicity across multi-column functions.

use thiserror::Error;

/// Error type for all trip feature operations.
#[derive(Error, Debug)]
pub enum FeatureError {
    /// A required input column is absent from the table.
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    /// A cell is null, has the wrong dtype, or cannot be parsed as the
    /// documented type (coordinate degrees or timestamp string).
    #[error("unparseable value in column '{column}': {value}")]
    UnparseableValue { column: String, value: String },

    /// Reprojection between coordinate reference systems failed, e.g. a
    /// malformed proj string or a point outside the projection domain.
    #[error("projection failure: {0}")]
    Projection(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using FeatureError.
pub type FeatureResult<T> = Result<T, FeatureError>;

impl From<anyhow::Error> for FeatureError {
    fn from(err: anyhow::Error) -> Self {
        FeatureError::Other(err.to_string())
    }
}

impl From<String> for FeatureError {
    fn from(s: String) -> Self {
        FeatureError::Other(s)
    }
}

impl From<&str> for FeatureError {
    fn from(s: &str) -> Self {
        FeatureError::Other(s.to_string())
    }
}
