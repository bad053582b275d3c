//! Error types for runedge-core
//!
//! Provides a unified error type for domain construction, value binding
//! and scanning. Each variant captures enough context for diagnostics
//! without exposing internal storage details.

use thiserror::Error;

/// runedge error type
#[derive(Error, Debug)]
pub enum Error {
    /// A required image argument is absent
    #[error("null input: {0}")]
    NullInput(&'static str),

    /// An image has no domain
    #[error("image has no domain")]
    NullDomain,

    /// An image has no values
    #[error("image has no values")]
    NullValues,

    /// Inputs have incompatible object types or dimensionality
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// Operation requested on a dimensionality that is not implemented
    #[error("unsupported dimensionality: {0}D")]
    UnsupportedDimensionality(u32),

    /// Buffer or interval storage growth failed
    #[error("memory allocation failed")]
    AllocationFailed,

    /// Interval with non-positive length or outside the bounding box
    #[error("invalid interval on line {line}: left {left}, length {len}")]
    InvalidInterval { line: i32, left: i32, len: i32 },

    /// Images were expected to share one domain
    #[error("images do not share the same domain")]
    DomainMismatch,

    /// Value table size differs from the domain area
    #[error("value count mismatch: domain has {expected} pixels, got {actual} values")]
    ValueCountMismatch { expected: usize, actual: usize },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<std::collections::TryReserveError> for Error {
    fn from(_: std::collections::TryReserveError) -> Self {
        Error::AllocationFailed
    }
}

/// Result type alias for runedge operations
pub type Result<T> = std::result::Result<T, Error>;
