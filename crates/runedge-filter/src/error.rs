//! Error types for runedge-filter
//!
//! Validation failures on the inputs (missing domains or values,
//! dimensionality mismatches) come from the core crate and are wrapped
//! unchanged; the filter adds only its own parameter errors.

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] runedge_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
