//! Scan cursor over interval domains
//!
//! [`IntervalScan`] visits the intervals of a domain in strict line then
//! column order. Each [`ScanInterval`] carries what a line-synchronised
//! consumer needs: how many lines were stepped over to reach it, whether it
//! closes its line, and where its samples start in a value table bound to
//! the domain.

use super::IntervalDomain;

/// One interval as seen by a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanInterval {
    /// Line of the interval
    pub line: i32,
    /// First column
    pub left: i32,
    /// Last column (inclusive)
    pub right: i32,
    /// Index of the first pixel in the scan-ordered value table
    pub offset: usize,
    /// Lines moved since the previous interval; zero within a line. The
    /// first interval counts from the line before the bounding box.
    pub lines_advanced: i32,
    /// Whether no further interval follows on this line
    pub last_in_line: bool,
}

impl ScanInterval {
    /// Number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        (self.right - self.left + 1) as usize
    }

    /// Whether the interval covers no columns (never true for a scan).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.right < self.left
    }
}

/// Iterator over the intervals of an [`IntervalDomain`]
#[derive(Debug, Clone)]
pub struct IntervalScan<'a> {
    domain: &'a IntervalDomain,
    /// Global index of the next interval
    next: usize,
    /// Line holding interval `next`
    line: i32,
    /// Line of the previously yielded interval
    prev_line: i32,
    /// Pixels yielded so far
    offset: usize,
}

impl<'a> IntervalScan<'a> {
    pub(crate) fn new(domain: &'a IntervalDomain) -> Self {
        Self {
            domain,
            next: 0,
            line: domain.line1,
            prev_line: domain.line1 - 1,
            offset: 0,
        }
    }

    /// Domain being scanned.
    pub fn domain(&self) -> &'a IntervalDomain {
        self.domain
    }
}

impl Iterator for IntervalScan<'_> {
    type Item = ScanInterval;

    fn next(&mut self) -> Option<ScanInterval> {
        let d = self.domain;
        let itv = *d.intervals.get(self.next)?;
        // Skip lines whose interval range ends before `next`.
        while d.line_starts[(self.line - d.line1) as usize + 1] <= self.next {
            self.line += 1;
        }
        let line_end = d.line_starts[(self.line - d.line1) as usize + 1];
        let item = ScanInterval {
            line: self.line,
            left: itv.left,
            right: itv.right,
            offset: self.offset,
            lines_advanced: self.line - self.prev_line,
            last_in_line: self.next + 1 == line_end,
        };
        self.prev_line = self.line;
        self.offset += itv.len() as usize;
        self.next += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.domain.intervals.len() - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for IntervalScan<'_> {}
