//! Suppression options

use crate::{FilterError, FilterResult};
use runedge_core::GreyValue;

/// Numeric representation of the working buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufferRepresentation {
    /// Integer unless any input is floating
    #[default]
    Auto,
    /// Always `i32`; rejected for floating input
    Integer,
    /// Always `f64`
    Floating,
}

impl BufferRepresentation {
    /// Decide whether to work in floating point.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] when `Integer` is forced
    /// on floating input.
    pub fn resolve(self, floating_input: bool) -> FilterResult<bool> {
        match self {
            BufferRepresentation::Auto => Ok(floating_input),
            BufferRepresentation::Floating => Ok(true),
            BufferRepresentation::Integer if floating_input => Err(FilterError::InvalidParameters(
                "integer buffers requested for floating point gradients".to_string(),
            )),
            BufferRepresentation::Integer => Ok(false),
        }
    }
}

/// Options for [`non_maximal_suppression`](super::non_maximal_suppression)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuppressOptions {
    /// Magnitudes at or below this value are never maximal. Converted to
    /// the buffer representation, rounding to nearest for integers.
    pub min_gradient: GreyValue,
    /// Working buffer representation
    pub representation: BufferRepresentation,
}

impl Default for SuppressOptions {
    fn default() -> Self {
        Self {
            min_gradient: GreyValue::Int(0),
            representation: BufferRepresentation::Auto,
        }
    }
}

impl SuppressOptions {
    /// Set the minimum gradient magnitude.
    pub fn with_min_gradient(mut self, min_gradient: impl Into<GreyValue>) -> Self {
        self.min_gradient = min_gradient.into();
        self
    }

    /// Set the working buffer representation.
    pub fn with_representation(mut self, representation: BufferRepresentation) -> Self {
        self.representation = representation;
        self
    }
}
