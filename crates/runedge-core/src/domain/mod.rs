//! Interval domains - run-length encoded 2D point sets
//!
//! An [`IntervalDomain`] describes which pixels of an image are present:
//! a bounding box of lines (rows) and columns, and for every line an
//! ordered list of disjoint column [`Interval`]s.
//!
//! # Storage
//!
//! Intervals of all lines are held in a single vector; a second vector
//! holds, for every line of the bounding box, the index of its first
//! interval (`line_starts[k]..line_starts[k + 1]` are the intervals of
//! line `line1 + k`).
//!
//! Domains are built incrementally with [`IntervalDomainBuilder`] and are
//! immutable once normalised.
//!
//! # Examples
//!
//! ```
//! use runedge_core::{Interval, IntervalDomain};
//!
//! let domain = IntervalDomain::rectangle(10, 20, 4, 3).unwrap();
//! assert_eq!(domain.area(), 12);
//! assert!(domain.contains(11, 23));
//! assert!(!domain.contains(11, 24));
//! assert_eq!(domain.line_intervals(12), &[Interval::new(20, 23)]);
//! ```

pub mod builder;
pub mod intersect;
pub mod scan;

pub use builder::IntervalDomainBuilder;
pub use intersect::{intersect_domains, intersect_images, intersect_line};
pub use scan::{IntervalScan, ScanInterval};

use crate::error::{Error, Result};
use std::fmt;

/// Inclusive column range on one line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    /// First column
    pub left: i32,
    /// Last column (inclusive)
    pub right: i32,
}

impl Interval {
    /// Create an interval from inclusive bounds.
    pub fn new(left: i32, right: i32) -> Self {
        Self { left, right }
    }

    /// Create an interval from its first column and length.
    pub fn from_len(left: i32, len: i32) -> Self {
        Self {
            left,
            right: left + len - 1,
        }
    }

    /// Number of columns covered.
    #[inline]
    pub fn len(&self) -> i32 {
        self.right - self.left + 1
    }

    /// Whether the interval covers no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.right < self.left
    }

    /// Whether `col` lies in the interval.
    #[inline]
    pub fn contains(&self, col: i32) -> bool {
        col >= self.left && col <= self.right
    }

    /// Whether `other` lies entirely in this interval.
    #[inline]
    pub fn covers(&self, other: &Interval) -> bool {
        other.left >= self.left && other.right <= self.right
    }
}

/// Run-length encoded 2D domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalDomain {
    /// First line
    line1: i32,
    /// Last line (inclusive)
    lastln: i32,
    /// First column
    kol1: i32,
    /// Last column (inclusive)
    lastkl: i32,
    /// Index of the first interval of each line, plus one trailing entry
    line_starts: Vec<usize>,
    /// Intervals of all lines in scan order
    intervals: Vec<Interval>,
}

impl IntervalDomain {
    /// Create a domain covering a full rectangle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `width` or `height` is zero.
    pub fn rectangle(line1: i32, kol1: i32, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidParameter(format!(
                "rectangle must be non-empty, got {width}x{height}"
            )));
        }
        let lastln = line1 + height as i32 - 1;
        let lastkl = kol1 + width as i32 - 1;
        let itv = Interval::new(kol1, lastkl);
        Ok(Self {
            line1,
            lastln,
            kol1,
            lastkl,
            line_starts: (0..=height as usize).collect(),
            intervals: vec![itv; height as usize],
        })
    }

    /// Create a domain from explicit per-line intervals.
    ///
    /// `lines[k]` holds the intervals of line `line1 + k`; it must have
    /// exactly `lastln - line1 + 1` entries. The result is normalised.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the line count does not match
    /// the bounding box, or [`Error::InvalidInterval`] if an interval is
    /// empty, out of the bounding box, or out of order.
    pub fn from_line_intervals(
        line1: i32,
        lastln: i32,
        kol1: i32,
        lastkl: i32,
        lines: &[Vec<Interval>],
    ) -> Result<Self> {
        let expected = (lastln - line1 + 1).max(0) as usize;
        if lines.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "expected {expected} lines, got {}",
                lines.len()
            )));
        }
        let mut builder = IntervalDomainBuilder::new(line1, lastln, kol1, lastkl)?;
        for (k, line) in lines.iter().enumerate() {
            let ln = line1 + k as i32;
            let mut prev_right: Option<i32> = None;
            for itv in line {
                if prev_right.is_some_and(|r| itv.left <= r) {
                    return Err(Error::InvalidInterval {
                        line: ln,
                        left: itv.left,
                        len: itv.len(),
                    });
                }
                builder.append_interval(ln, itv.left, itv.len())?;
                prev_right = Some(itv.right);
            }
        }
        builder.normalize()
    }

    /// Create a domain from a boolean mask; `rows[k][j]` marks pixel
    /// (`line1 + k`, `kol1 + j`) as present.
    ///
    /// Rows may have different lengths. The result is normalised and may
    /// be empty.
    pub fn from_mask<R: AsRef<[bool]>>(line1: i32, kol1: i32, rows: &[R]) -> Result<Self> {
        let width = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
        let lastln = line1 + rows.len().max(1) as i32 - 1;
        let lastkl = kol1 + width.max(1) as i32 - 1;
        let mut builder = IntervalDomainBuilder::new(line1, lastln, kol1, lastkl)?;
        for (k, row) in rows.iter().enumerate() {
            let ln = line1 + k as i32;
            let mut start: Option<usize> = None;
            let row = row.as_ref();
            for (j, &present) in row.iter().chain(std::iter::once(&false)).enumerate() {
                match (present, start) {
                    (true, None) => start = Some(j),
                    (false, Some(s)) => {
                        builder.append_interval(ln, kol1 + s as i32, (j - s) as i32)?;
                        start = None;
                    }
                    _ => {}
                }
            }
        }
        builder.normalize()
    }

    /// Assemble a domain from already-canonical parts.
    pub(crate) fn from_parts(
        line1: i32,
        lastln: i32,
        kol1: i32,
        lastkl: i32,
        line_starts: Vec<usize>,
        intervals: Vec<Interval>,
    ) -> Self {
        debug_assert_eq!(line_starts.len() as i32, (lastln - line1 + 1).max(0) + 1);
        Self {
            line1,
            lastln,
            kol1,
            lastkl,
            line_starts,
            intervals,
        }
    }

    /// First line of the bounding box.
    #[inline]
    pub fn line1(&self) -> i32 {
        self.line1
    }

    /// Last line of the bounding box (inclusive).
    #[inline]
    pub fn lastln(&self) -> i32 {
        self.lastln
    }

    /// First column of the bounding box.
    #[inline]
    pub fn kol1(&self) -> i32 {
        self.kol1
    }

    /// Last column of the bounding box (inclusive).
    #[inline]
    pub fn lastkl(&self) -> i32 {
        self.lastkl
    }

    /// Bounding box as `(line1, lastln, kol1, lastkl)`.
    pub fn bounding_box(&self) -> (i32, i32, i32, i32) {
        (self.line1, self.lastln, self.kol1, self.lastkl)
    }

    /// Number of lines in the bounding box.
    pub fn height(&self) -> usize {
        (self.lastln - self.line1 + 1).max(0) as usize
    }

    /// Number of columns in the bounding box.
    pub fn width(&self) -> usize {
        (self.lastkl - self.kol1 + 1).max(0) as usize
    }

    /// Number of present pixels.
    pub fn area(&self) -> usize {
        self.intervals.iter().map(|i| i.len() as usize).sum()
    }

    /// Total number of intervals.
    pub fn interval_count(&self) -> usize {
        self.intervals.len()
    }

    /// Whether the domain has no present pixels.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Intervals of `line`; empty outside the bounding box.
    pub fn line_intervals(&self, line: i32) -> &[Interval] {
        if line < self.line1 || line > self.lastln {
            return &[];
        }
        let k = (line - self.line1) as usize;
        &self.intervals[self.line_starts[k]..self.line_starts[k + 1]]
    }

    /// Iterate `(line, intervals)` over every line of the bounding box.
    pub fn lines(&self) -> impl Iterator<Item = (i32, &[Interval])> + '_ {
        (self.line1..=self.lastln).map(move |ln| (ln, self.line_intervals(ln)))
    }

    /// Whether pixel (`line`, `col`) is present.
    pub fn contains(&self, line: i32, col: i32) -> bool {
        self.find_interval(line, col).is_some()
    }

    /// Index into the scan-ordered pixel sequence of pixel (`line`, `col`),
    /// or `None` if the pixel is absent.
    pub fn pixel_offset(&self, line: i32, col: i32) -> Option<usize> {
        let k = self.find_interval(line, col)?;
        let before: usize = self.intervals[..k].iter().map(|i| i.len() as usize).sum();
        Some(before + (col - self.intervals[k].left) as usize)
    }

    /// Global index of the interval containing (`line`, `col`).
    fn find_interval(&self, line: i32, col: i32) -> Option<usize> {
        if line < self.line1 || line > self.lastln {
            return None;
        }
        let k = (line - self.line1) as usize;
        let base = self.line_starts[k];
        let itvs = &self.intervals[base..self.line_starts[k + 1]];
        // Intervals are sorted and disjoint: the candidate is the last one
        // starting at or before `col`.
        let idx = itvs.partition_point(|i| i.left <= col);
        if idx > 0 && itvs[idx - 1].contains(col) {
            Some(base + idx - 1)
        } else {
            None
        }
    }

    /// Whether every pixel of this domain is present in `other`.
    pub fn is_subset_of(&self, other: &IntervalDomain) -> bool {
        self.lines().all(|(ln, itvs)| {
            let outer = other.line_intervals(ln);
            itvs.iter().all(|itv| {
                let idx = outer.partition_point(|o| o.left <= itv.left);
                idx > 0 && outer[idx - 1].covers(itv)
            })
        })
    }

    /// Cursor over the intervals in scan order.
    pub fn scan(&self) -> IntervalScan<'_> {
        IntervalScan::new(self)
    }
}

/// One line per non-empty line: `line: [l0,r0] [l1,r1] ...`
impl fmt::Display for IntervalDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "lines {}..={} cols {}..={}",
            self.line1, self.lastln, self.kol1, self.lastkl
        )?;
        for (ln, itvs) in self.lines().filter(|(_, i)| !i.is_empty()) {
            write!(f, "{ln}:")?;
            for itv in itvs {
                write!(f, " [{},{}]", itv.left, itv.right)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
