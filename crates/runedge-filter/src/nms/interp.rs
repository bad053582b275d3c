//! Sub-pixel magnitude comparison along the gradient
//!
//! For each sector two neighbours lie on the side the gradient points to:
//! the *near* one (sharing an edge with the centre) and the *far* one
//! (diagonal). The neighbours on the opposite side are their point
//! reflections through the centre. The magnitude one unit along the
//! gradient is linearly interpolated from centre, near and far, and the
//! centre is kept only if it beats both sides.

use super::octant::Octant;
use super::sample::GradientSample;
use super::window::Neighbourhood;
use std::cmp::Ordering;

/// Magnitude term used in an interpolation difference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Term {
    Centre,
    Near,
    Far,
}

/// Taps and difference terms for one sector
#[derive(Debug, Clone, Copy)]
struct Stencil {
    /// (dy, dx) of the edge-adjacent neighbour towards the gradient
    near: (i8, i8),
    /// (dy, dx) of the diagonal neighbour towards the gradient
    far: (i8, i8),
    /// Difference multiplied by gx
    primary: (Term, Term),
    /// Difference multiplied by gy
    secondary: (Term, Term),
}

use Term::{Centre as M, Far as F, Near as N};

const STENCILS: [Stencil; 8] = [
    Stencil { near: (0, -1), far: (1, -1), primary: (M, N), secondary: (N, F) },
    Stencil { near: (1, 0), far: (1, -1), primary: (N, F), secondary: (M, N) },
    Stencil { near: (1, 0), far: (1, 1), primary: (F, N), secondary: (M, N) },
    Stencil { near: (0, 1), far: (1, 1), primary: (N, M), secondary: (N, F) },
    Stencil { near: (0, 1), far: (-1, 1), primary: (N, M), secondary: (F, N) },
    Stencil { near: (-1, 0), far: (-1, 1), primary: (F, N), secondary: (N, M) },
    Stencil { near: (-1, 0), far: (-1, -1), primary: (N, F), secondary: (N, M) },
    Stencil { near: (0, -1), far: (-1, -1), primary: (M, N), secondary: (F, N) },
];

impl Stencil {
    /// Interpolated difference on one side; `sign` is 1 towards the
    /// gradient and -1 away from it.
    fn side<T: GradientSample>(&self, n: &Neighbourhood<T>, sign: i8, gx: T, gy: T) -> T {
        let gm = n.centre();
        let g0 = n.tap(sign * self.near.0, sign * self.near.1);
        let g1 = n.tap(sign * self.far.0, sign * self.far.1);
        let term = |t: Term| match t {
            Term::Centre => gm,
            Term::Near => g0,
            Term::Far => g1,
        };
        T::interpolate(
            (term(self.primary.0), term(self.primary.1)),
            (term(self.secondary.0), term(self.secondary.1)),
            gx,
            gy,
            gm,
        )
    }
}

/// Whether the centre of `n` is a strict local maximum along (`gx`, `gy`).
///
/// The centre magnitude must be significant, since it is the divisor.
pub fn is_maximal<T: GradientSample>(n: &Neighbourhood<T>, octant: Octant, gx: T, gy: T) -> bool {
    let stencil = &STENCILS[octant.code() as usize];
    stencil.side(n, 1, gx, gy).exceeds_noise() && stencil.side(n, -1, gx, gy).exceeds_noise()
}

/// Classify the centre of `n`, returning its sector if it survives
/// suppression.
///
/// Pixels whose magnitude is insignificant or not above `min_gm` are
/// never maximal.
pub fn classify<T: GradientSample>(n: &Neighbourhood<T>, gx: T, gy: T, min_gm: T) -> Option<Octant> {
    let gm = n.centre();
    let above = matches!(gm.partial_cmp(&min_gm), Some(Ordering::Greater));
    if !gm.is_significant() || !above {
        return None;
    }
    let octant = Octant::from_gradient(gx, gy);
    is_maximal(n, octant, gx, gy).then_some(octant)
}
