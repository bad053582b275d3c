//! runedge Core - Run-length image data structures
//!
//! This crate provides the data structures the runedge filters work on:
//!
//! - [`IntervalDomain`] / [`Interval`] - Run-length encoded 2D point sets
//! - [`IntervalDomainBuilder`] - Append-only construction with normalisation
//! - [`IntervalScan`] / [`GreyScan`] - Line-synchronised scan cursors
//! - [`GreyValues`] / [`GreyValue`] - Sample tables in one of five representations
//! - [`Image`] / [`PlanarImage`] / [`VolumeImage`] - Domains paired with values
//! - [`intersect_domains`] / [`intersect_images`] - Point-set intersection

pub mod domain;
pub mod error;
pub mod image;
pub mod values;

pub use domain::{
    Interval, IntervalDomain, IntervalDomainBuilder, IntervalScan, ScanInterval,
    intersect_domains, intersect_images, intersect_line,
};
pub use error::{Error, Result};
pub use image::{GreyScan, Image, PlanarImage, VolumeImage};
pub use values::{FromGrey, GreySlice, GreyType, GreyValue, GreyValues};
