//! runedge-filter - Edge filtering over run-length images
//!
//! This crate provides:
//!
//! - Non-maximal suppression of gradient images ([`non_maximal_suppression`])
//! - Gradient direction quantisation into eight sectors ([`Octant`])

mod error;
pub mod nms;

pub use error::{FilterError, FilterResult};

// Re-export commonly used items
pub use nms::{
    BufferRepresentation, MAXIMAL_FLAG, Octant, SuppressOptions, non_maximal_suppression,
    suppress_planar,
};
