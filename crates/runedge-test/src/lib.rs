//! runedge-test - Regression test framework for runedge
//!
//! This crate provides a small regression test harness in the style of a
//! numbered checklist ([`RegParams`]): every comparison is indexed, failures
//! are collected instead of aborting, and [`RegParams::cleanup`] reports the
//! outcome.
//!
//! It also builds the synthetic planar images the regression tests feed to
//! the filters, from nested row slices.
//!
//! # Usage
//!
//! ```
//! use runedge_test::{RegParams, planar_int};
//!
//! let img = planar_int(0, 0, &[&[1, 2], &[3, 4]]).unwrap();
//! let mut rp = RegParams::new("fixture");
//! rp.compare_values(4.0, img.domain().unwrap().area() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::RegParams;

use runedge_core::{GreyType, GreyValues, IntervalDomain, PlanarImage};

/// Check that `rows` is a non-empty rectangle and return its width.
fn rect_width<T>(rows: &[&[T]]) -> TestResult<usize> {
    let width = rows.first().map(|r| r.len()).ok_or(TestError::EmptyFixture)?;
    if width == 0 {
        return Err(TestError::EmptyFixture);
    }
    for (row, r) in rows.iter().enumerate() {
        if r.len() != width {
            return Err(TestError::RaggedRows {
                row,
                expected: width,
                actual: r.len(),
            });
        }
    }
    Ok(width)
}

/// Build a rectangular `Int` image whose top-left pixel is (`line1`, `kol1`).
pub fn planar_int(line1: i32, kol1: i32, rows: &[&[i32]]) -> TestResult<PlanarImage> {
    let width = rect_width(rows)?;
    let domain = IntervalDomain::rectangle(line1, kol1, width as u32, rows.len() as u32)?;
    let values = GreyValues::Int(rows.iter().flat_map(|r| r.iter().copied()).collect());
    Ok(PlanarImage::new(domain, values)?)
}

/// Build a rectangular `Double` image whose top-left pixel is
/// (`line1`, `kol1`).
pub fn planar_double(line1: i32, kol1: i32, rows: &[&[f64]]) -> TestResult<PlanarImage> {
    let width = rect_width(rows)?;
    let domain = IntervalDomain::rectangle(line1, kol1, width as u32, rows.len() as u32)?;
    let values = GreyValues::Double(rows.iter().flat_map(|r| r.iter().copied()).collect());
    Ok(PlanarImage::new(domain, values)?)
}

/// Build an `Int` image from rows where `None` marks an absent pixel.
pub fn planar_masked(line1: i32, kol1: i32, rows: &[&[Option<i32>]]) -> TestResult<PlanarImage> {
    let mask: Vec<Vec<bool>> = rows
        .iter()
        .map(|r| r.iter().map(Option::is_some).collect())
        .collect();
    let domain = IntervalDomain::from_mask(line1, kol1, &mask)?;
    let values = GreyValues::Int(rows.iter().flat_map(|r| r.iter().flatten().copied()).collect());
    Ok(PlanarImage::new(domain, values)?)
}

/// Sample `f(line, col)` over every pixel of `domain` into values of
/// `grey_type`; integer types round to nearest.
pub fn planar_from_fn<F>(domain: IntervalDomain, grey_type: GreyType, f: F) -> TestResult<PlanarImage>
where
    F: Fn(i32, i32) -> f64,
{
    let samples: Vec<f64> = domain
        .scan()
        .flat_map(|s| (s.left..=s.right).map(move |col| (s.line, col)))
        .map(|(line, col)| f(line, col))
        .collect();
    let values = match grey_type {
        GreyType::UByte => GreyValues::UByte(
            samples.iter().map(|v| v.round().clamp(0.0, 255.0) as u8).collect(),
        ),
        GreyType::Short => GreyValues::Short(samples.iter().map(|v| v.round() as i16).collect()),
        GreyType::Int => GreyValues::Int(samples.iter().map(|v| v.round() as i32).collect()),
        GreyType::Float => GreyValues::Float(samples.iter().map(|&v| v as f32).collect()),
        GreyType::Double => GreyValues::Double(samples),
    };
    Ok(PlanarImage::new(domain, values)?)
}
