//! Suppression of a single interval
//!
//! Each pixel of an interval is classified against its 3x3 neighbourhood;
//! maximal pixels get a direction code and consecutive maximal pixels are
//! collected into runs for the output domain. The first and last column of
//! every interval are never maximal, as their outer neighbours are unknown.

use super::interp::classify;
use super::sample::GradientSample;
use super::window::RollingWindow;
use crate::FilterResult;
use runedge_core::{Interval, IntervalDomainBuilder, ScanInterval};

/// Collects consecutive maximal columns into intervals
#[derive(Debug, Default)]
pub struct RunAccumulator {
    left: i32,
    len: i32,
}

impl RunAccumulator {
    /// Record whether column `col` is maximal. Columns must be pushed in
    /// increasing order without gaps. Returns the run closed by a
    /// non-maximal column, if any.
    pub fn push(&mut self, col: i32, maximal: bool) -> Option<Interval> {
        if maximal {
            if self.len == 0 {
                self.left = col;
            }
            self.len += 1;
            None
        } else {
            self.finish()
        }
    }

    /// Close the open run, if any.
    pub fn finish(&mut self) -> Option<Interval> {
        if self.len == 0 {
            return None;
        }
        let run = Interval::from_len(self.left, self.len);
        self.len = 0;
        Some(run)
    }
}

/// Suppress the pixels of one interval.
///
/// # Arguments
///
/// * `window` - Magnitude lines `itv.line - 1 ..= itv.line + 1`
/// * `itv` - Interval being processed
/// * `gy`, `gx` - Vertical and horizontal gradient samples of the interval
/// * `min_gm` - Magnitudes not above this are never maximal
/// * `codes` - Output codes for the interval, one per column
/// * `builder` - Receives the runs of maximal pixels
///
/// Returns the number of maximal pixels.
pub fn suppress_interval<T: GradientSample>(
    window: &RollingWindow<T>,
    itv: &ScanInterval,
    gy: &[T],
    gx: &[T],
    min_gm: T,
    codes: &mut [u8],
    builder: &mut IntervalDomainBuilder,
) -> FilterResult<usize> {
    let last = itv.len() - 1;
    let mut runs = RunAccumulator::default();
    let mut count = 0;
    for (i, code) in codes.iter_mut().enumerate().take(itv.len()) {
        let col = itv.left + i as i32;
        let octant = if i == 0 || i == last {
            None
        } else {
            classify(&window.neighbourhood(itv.line, col), gx[i], gy[i], min_gm)
        };
        *code = octant.map_or(0, |o| o.direction_code());
        if octant.is_some() {
            count += 1;
        }
        if let Some(run) = runs.push(col, octant.is_some()) {
            builder.append_interval(itv.line, run.left, run.len())?;
        }
    }
    if let Some(run) = runs.finish() {
        builder.append_interval(itv.line, run.left, run.len())?;
    }
    Ok(count)
}
