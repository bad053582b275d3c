//! runedge - Edge thinning for run-length encoded images
//!
//! Images are stored as interval domains (runs of present pixels per line)
//! paired with grey values. The library thins gradient images down to
//! one-pixel wide edges by non-maximal suppression.
//!
//! # Overview
//!
//! - Interval domains, builders, scans and intersection (core types,
//!   re-exported at the crate root)
//! - Non-maximal suppression ([`filter`])
//!
//! # Example
//!
//! ```
//! use runedge::filter::{SuppressOptions, non_maximal_suppression};
//! use runedge::{GreyValue, GreyValues, IntervalDomain, PlanarImage};
//!
//! // Horizontal ridge on line 2 of a 5x5 image, gradient through lines
//! let domain = IntervalDomain::rectangle(0, 0, 5, 5).unwrap();
//! let mag: Vec<i32> = (0..25).map(|i| [0, 3, 8, 3, 0][i / 5]).collect();
//! let mag = PlanarImage::new(domain.clone(), GreyValues::Int(mag)).unwrap();
//! let gy = PlanarImage::new(domain.clone(), GreyValues::Int(vec![5; 25])).unwrap();
//! let gx = PlanarImage::new(domain, GreyValues::Int(vec![0; 25])).unwrap();
//!
//! let edges = non_maximal_suppression(
//!     &mag.into(),
//!     None,
//!     &gy.into(),
//!     &gx.into(),
//!     &SuppressOptions::default(),
//! )
//! .unwrap();
//! let edges = edges.as_planar().unwrap();
//! assert_eq!(edges.domain().unwrap().area(), 3);
//! assert_eq!(edges.value_at(2, 2), Some(GreyValue::UByte(0x86)));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use runedge_core::*;

// Re-export the filter crate as a module
pub use runedge_filter as filter;
