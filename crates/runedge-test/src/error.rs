//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building regression fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Fixture rows have different lengths
    #[error("ragged fixture: row {row} has {actual} samples, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Fixture has no rows or no columns
    #[error("fixture must have at least one row and one column")]
    EmptyFixture,

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] runedge_core::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
