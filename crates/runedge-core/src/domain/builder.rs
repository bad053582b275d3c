//! Incremental construction of interval domains
//!
//! [`IntervalDomainBuilder`] accepts intervals line by line, in
//! non-decreasing line order, and produces an immutable, canonical
//! [`IntervalDomain`] with [`IntervalDomainBuilder::normalize`].
//!
//! Interval storage is reserved up front from a guess at the output size
//! and then grown in blocks of the same size, so a scan that appends many
//! short runs rarely reallocates.

use super::{Interval, IntervalDomain};
use crate::error::{Error, Result};

/// Fixed slack added to the capacity guess.
const CAPACITY_SLACK: usize = 1024;

/// Append-only builder for [`IntervalDomain`]
#[derive(Debug, Clone)]
pub struct IntervalDomainBuilder {
    line1: i32,
    lastln: i32,
    kol1: i32,
    lastkl: i32,
    /// Growth step, also the initial capacity
    block: usize,
    /// Appended intervals tagged with their line
    intervals: Vec<(i32, Interval)>,
}

impl IntervalDomainBuilder {
    /// Create an empty builder spanning the given bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the box is inverted and
    /// [`Error::AllocationFailed`] if the initial storage cannot be
    /// reserved.
    pub fn new(line1: i32, lastln: i32, kol1: i32, lastkl: i32) -> Result<Self> {
        if lastln < line1 || lastkl < kol1 {
            return Err(Error::InvalidParameter(format!(
                "inverted bounding box: lines {line1}..={lastln}, cols {kol1}..={lastkl}"
            )));
        }
        let width = (lastkl - kol1 + 1) as usize;
        let height = (lastln - line1 + 1) as usize;
        let block = (width * height) / 64 + width + CAPACITY_SLACK;
        let mut intervals = Vec::new();
        intervals.try_reserve_exact(block)?;
        Ok(Self {
            line1,
            lastln,
            kol1,
            lastkl,
            block,
            intervals,
        })
    }

    /// Capacity guess used for the initial reservation and for growth.
    pub fn block_size(&self) -> usize {
        self.block
    }

    /// Number of intervals appended so far.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Whether no interval has been appended.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Append the interval of `len` columns starting at `left` on `line`.
    ///
    /// Lines must be appended in non-decreasing order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInterval`] if `len` is not positive or the
    /// interval leaves the bounding box, and [`Error::AllocationFailed`] if
    /// the storage cannot grow.
    pub fn append_interval(&mut self, line: i32, left: i32, len: i32) -> Result<()> {
        let inside = len > 0
            && line >= self.line1
            && line <= self.lastln
            && left >= self.kol1
            && left.checked_add(len - 1).is_some_and(|r| r <= self.lastkl);
        if !inside {
            return Err(Error::InvalidInterval { line, left, len });
        }
        debug_assert!(
            self.intervals.last().is_none_or(|&(ln, _)| ln <= line),
            "intervals must be appended in non-decreasing line order"
        );
        if self.intervals.len() == self.intervals.capacity() {
            log::trace!(
                "interval storage full at {} intervals, growing by {}",
                self.intervals.len(),
                self.block
            );
            self.intervals.try_reserve(self.block)?;
        }
        self.intervals.push((line, Interval::from_len(left, len)));
        Ok(())
    }

    /// Canonicalise the appended intervals into an [`IntervalDomain`].
    ///
    /// Intervals that overlap or touch on a line are merged, empty leading
    /// and trailing lines are dropped and the column bounds shrink to the
    /// actual extent. A builder without intervals yields an empty domain
    /// over its original bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the compact storage cannot
    /// be reserved.
    pub fn normalize(mut self) -> Result<IntervalDomain> {
        // Stable: lines are already ordered, this orders columns per line.
        self.intervals.sort_by_key(|&(ln, itv)| (ln, itv.left));

        let mut merged: Vec<(i32, Interval)> = Vec::new();
        merged.try_reserve_exact(self.intervals.len())?;
        for &(ln, itv) in &self.intervals {
            let touches = matches!(
                merged.last(),
                Some(&(last_ln, last)) if last_ln == ln && itv.left <= last.right + 1
            );
            if let (true, Some((_, last))) = (touches, merged.last_mut()) {
                last.right = last.right.max(itv.right);
            } else {
                merged.push((ln, itv));
            }
        }

        let (Some(&(first_ln, _)), Some(&(last_ln, _))) = (merged.first(), merged.last()) else {
            let height = (self.lastln - self.line1 + 1) as usize;
            return Ok(IntervalDomain::from_parts(
                self.line1,
                self.lastln,
                self.kol1,
                self.lastkl,
                vec![0; height + 1],
                Vec::new(),
            ));
        };
        let kol1 = merged.iter().map(|(_, i)| i.left).min().unwrap_or(self.kol1);
        let lastkl = merged.iter().map(|(_, i)| i.right).max().unwrap_or(self.lastkl);

        let height = (last_ln - first_ln + 1) as usize;
        let mut line_starts = Vec::new();
        line_starts.try_reserve_exact(height + 1)?;
        let mut idx = 0;
        for ln in first_ln..=last_ln {
            line_starts.push(idx);
            while idx < merged.len() && merged[idx].0 == ln {
                idx += 1;
            }
        }
        line_starts.push(idx);

        let mut intervals = Vec::new();
        intervals.try_reserve_exact(merged.len())?;
        intervals.extend(merged.into_iter().map(|(_, itv)| itv));

        Ok(IntervalDomain::from_parts(
            first_ln,
            last_ln,
            kol1,
            lastkl,
            line_starts,
            intervals,
        ))
    }
}
