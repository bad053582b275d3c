//! Numeric representations of the suppression buffers
//!
//! The engine runs either on `i32` or on `f64` samples. The two differ in
//! what counts as zero: integers compare exactly, while doubles treat
//! anything within `f64::EPSILON` of zero as numerical noise.

use runedge_core::FromGrey;
use std::fmt::Debug;

/// Sample type the suppression engine is generic over
pub trait GradientSample: FromGrey + Copy + Default + PartialOrd + Debug {
    /// Whether a gradient magnitude is distinguishable from zero.
    fn is_significant(self) -> bool;

    /// Whether `a * a >= b * b`.
    fn dominates(a: Self, b: Self) -> bool;

    /// `((p0 - p1) * gx - (s0 - s1) * gy) / gm`, the magnitude difference
    /// interpolated one unit along the gradient.
    fn interpolate(p: (Self, Self), s: (Self, Self), gx: Self, gy: Self, gm: Self) -> Self;

    /// Whether an interpolated difference is strictly positive.
    fn exceeds_noise(self) -> bool;
}

impl GradientSample for i32 {
    #[inline]
    fn is_significant(self) -> bool {
        self != 0
    }

    #[inline]
    fn dominates(a: Self, b: Self) -> bool {
        let (a, b) = (a as i64, b as i64);
        a * a >= b * b
    }

    #[inline]
    fn interpolate(p: (Self, Self), s: (Self, Self), gx: Self, gy: Self, gm: Self) -> Self {
        let dp = p.0 as i64 - p.1 as i64;
        let ds = s.0 as i64 - s.1 as i64;
        let num = dp
            .saturating_mul(gx as i64)
            .saturating_sub(ds.saturating_mul(gy as i64));
        // Truncates toward zero.
        (num / gm as i64).clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    #[inline]
    fn exceeds_noise(self) -> bool {
        self > 0
    }
}

impl GradientSample for f64 {
    #[inline]
    fn is_significant(self) -> bool {
        self * self > f64::EPSILON
    }

    #[inline]
    fn dominates(a: Self, b: Self) -> bool {
        a * a >= b * b
    }

    #[inline]
    fn interpolate(p: (Self, Self), s: (Self, Self), gx: Self, gy: Self, gm: Self) -> Self {
        ((p.0 - p.1) * gx - (s.0 - s.1) * gy) / gm
    }

    #[inline]
    fn exceeds_noise(self) -> bool {
        self > f64::EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_interpolate_truncates() {
        // (1 * 1 - 0) / 10 truncates to zero
        assert_eq!(i32::interpolate((10, 9), (0, 0), 1, 0, 10), 0);
        // (-7 - 0) / 2 truncates toward zero
        assert_eq!(i32::interpolate((0, 7), (0, 0), 1, 0, 2), -3);
        assert_eq!(i32::interpolate((10, 0), (0, 0), 7, -7, 10), 7);
    }

    #[test]
    fn test_int_no_overflow() {
        let v = i32::interpolate((i32::MAX, i32::MIN), (0, 0), i32::MAX, 0, 1);
        assert_eq!(v, i32::MAX);
        assert!(i32::dominates(-65536, 65535));
    }

    #[test]
    fn test_double_noise_floor() {
        assert!(!0.0f64.is_significant());
        assert!(!1.0e-9f64.is_significant());
        assert!(1.0e-6f64.is_significant());
        assert!(!(f64::EPSILON / 2.0).exceeds_noise());
        assert!(1.0e-10f64.exceeds_noise());
    }

    #[test]
    fn test_double_interpolate() {
        let v = f64::interpolate((10.0, 9.0), (0.0, 0.0), 1.0, 0.0, 10.0);
        assert!((v - 0.1).abs() < 1e-12);
    }
}
