//! Three-line rolling window over the gradient magnitude
//!
//! Each line buffer spans the magnitude bounding box plus one pad column on
//! either side, so a 3x3 neighbourhood can be read at any domain pixel
//! without bounds tests. Line `l` always lives in buffer `l mod 3`. Pixels
//! outside the domain read as zero.

use super::sample::GradientSample;
use crate::FilterResult;
use runedge_core::{GreySlice, ScanInterval};

/// Rolling buffers holding three consecutive magnitude lines
#[derive(Debug)]
pub struct RollingWindow<T> {
    rows: [Vec<T>; 3],
    kol1: i32,
}

impl<T: GradientSample> RollingWindow<T> {
    /// Allocate zeroed buffers for columns `kol1 .. kol1 + width`.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the buffers cannot be reserved.
    pub fn new(kol1: i32, width: usize) -> FilterResult<Self> {
        let padded = width + 2;
        let make = || -> FilterResult<Vec<T>> {
            let mut row = Vec::new();
            row.try_reserve_exact(padded)
                .map_err(runedge_core::Error::from)?;
            row.resize(padded, T::default());
            Ok(row)
        };
        Ok(Self {
            rows: [make()?, make()?, make()?],
            kol1,
        })
    }

    #[inline]
    fn slot(line: i32) -> usize {
        line.rem_euclid(3) as usize
    }

    #[inline]
    fn index(&self, col: i32) -> usize {
        (col - self.kol1 + 1) as usize
    }

    /// Zero the buffer that holds `line`.
    pub fn clear(&mut self, line: i32) {
        self.rows[Self::slot(line)].fill(T::default());
    }

    /// Copy one interval of magnitude samples into the buffer for its line.
    pub fn load(&mut self, itv: &ScanInterval, samples: GreySlice<'_>) {
        let start = self.index(itv.left);
        let row = &mut self.rows[Self::slot(itv.line)];
        samples.copy_to(&mut row[start..start + itv.len()]);
    }

    /// 3x3 neighbourhood centred on (`line`, `col`).
    pub fn neighbourhood(&self, line: i32, col: i32) -> Neighbourhood<T> {
        let c = self.index(col);
        let tap = |dy: i32| {
            let row = &self.rows[Self::slot(line + dy)];
            [row[c - 1], row[c], row[c + 1]]
        };
        Neighbourhood {
            g: [tap(-1), tap(0), tap(1)],
        }
    }
}

/// Magnitudes around one pixel, indexed `[dy + 1][dx + 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbourhood<T> {
    pub g: [[T; 3]; 3],
}

impl<T: Copy> Neighbourhood<T> {
    /// Magnitude at offset (`dy`, `dx`), each in `-1..=1`.
    #[inline]
    pub fn tap(&self, dy: i8, dx: i8) -> T {
        self.g[(dy + 1) as usize][(dx + 1) as usize]
    }

    /// Magnitude of the centre pixel.
    #[inline]
    pub fn centre(&self) -> T {
        self.g[1][1]
    }
}
