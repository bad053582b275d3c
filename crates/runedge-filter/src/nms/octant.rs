//! Gradient direction codes
//!
//! The plane is split into eight 45 degree sectors, numbered clockwise
//! from the positive column axis with lines growing downwards. A gradient
//! is assigned the sector it points into using only sign tests and one
//! squared-magnitude comparison.

use super::sample::GradientSample;

/// Sector for each `(gy >= 0, gx >= 0, gy² >= gx²)` combination
const SECTOR_TABLE: [u8; 8] = [3, 2, 0, 1, 4, 5, 7, 6];

/// Flag set on every code written to the output values
pub const MAXIMAL_FLAG: u8 = 0x80;

/// One of the eight gradient direction sectors, `0..=7`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Octant(u8);

impl Octant {
    /// Classify the gradient (`gx`, `gy`).
    ///
    /// `gx` is the column (horizontal) component and `gy` the line
    /// (vertical) component.
    pub fn from_gradient<T: GradientSample>(gx: T, gy: T) -> Self {
        let zero = T::default();
        let index = (usize::from(gy >= zero) << 2)
            | (usize::from(gx >= zero) << 1)
            | usize::from(T::dominates(gy, gx));
        Octant(SECTOR_TABLE[index])
    }

    /// Sector number in `0..=7`.
    #[inline]
    pub fn code(self) -> u8 {
        self.0
    }

    /// Value stored for a maximal pixel: the sector with [`MAXIMAL_FLAG`] set.
    #[inline]
    pub fn direction_code(self) -> u8 {
        MAXIMAL_FLAG | self.0
    }
}
