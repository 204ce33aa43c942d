use core::ops::Range;

use crate::traits::{g, FloatScalar, MatrixMut};

/// Plane rotation `G = [[c, -s], [s, c]]` acting on an index pair `(i, j)`.
///
/// Built by [`Givens::new`] so that `G [a, b]ᵗ = [r, 0]ᵗ`.
///
/// ```
/// use eigenkit::linalg::Givens;
///
/// let rot = Givens::new(3.0_f64, 4.0);
/// assert!((rot.r - 5.0).abs() < 1e-12);
/// assert!((rot.c * 3.0 - rot.s * 4.0 - 5.0).abs() < 1e-12);
/// assert!((rot.s * 3.0 + rot.c * 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Givens<T> {
    pub c: T,
    pub s: T,
    pub r: T,
}

impl<T: FloatScalar> Givens<T> {
    /// Rotation annihilating `b` against the pivot `a`.
    ///
    /// `b == 0` gives the identity with `r = a`; no division happens on any
    /// zero input. `(c, s)` is formed from `(a, b) / max(|a|, |b|)` so it
    /// stays a unit pair when the inputs are subnormal.
    pub fn new(a: T, b: T) -> Self {
        if b == T::zero() {
            return Self {
                c: T::one(),
                s: T::zero(),
                r: a,
            };
        }
        let p = a.abs().max(b.abs());
        let (a, b) = (a / p, b / p);
        let h = a.hypot(b);
        Self {
            c: a / h,
            s: -b / h,
            r: p * h,
        }
    }

    /// Rotation from a known `(c, s)` pair, e.g. a Jacobi rotation.
    pub fn from_cs(c: T, s: T) -> Self {
        Self { c, s, r: T::zero() }
    }

    /// `M ← G M` on rows `i` and `j`, restricted to `cols`.
    pub fn apply_left(&self, m: &mut impl MatrixMut<T>, i: usize, j: usize, cols: Range<usize>) {
        for k in cols {
            let x = g(m, i, k);
            let y = g(m, j, k);
            *m.get_mut(i, k) = self.c * x - self.s * y;
            *m.get_mut(j, k) = self.s * x + self.c * y;
        }
    }

    /// `M ← Gᵗ M` on rows `i` and `j`, restricted to `cols`.
    pub fn apply_left_transpose(
        &self,
        m: &mut impl MatrixMut<T>,
        i: usize,
        j: usize,
        cols: Range<usize>,
    ) {
        for k in cols {
            let x = g(m, i, k);
            let y = g(m, j, k);
            *m.get_mut(i, k) = self.c * x + self.s * y;
            *m.get_mut(j, k) = self.c * y - self.s * x;
        }
    }

    /// `M ← M G` on columns `i` and `j`, restricted to `rows`.
    pub fn apply_right(&self, m: &mut impl MatrixMut<T>, i: usize, j: usize, rows: Range<usize>) {
        for k in rows {
            let x = g(m, k, i);
            let y = g(m, k, j);
            *m.get_mut(k, i) = self.c * x + self.s * y;
            *m.get_mut(k, j) = self.c * y - self.s * x;
        }
    }

    /// `M ← M Gᵗ` on columns `i` and `j`, restricted to `rows`.
    pub fn apply_right_transpose(
        &self,
        m: &mut impl MatrixMut<T>,
        i: usize,
        j: usize,
        rows: Range<usize>,
    ) {
        for k in rows {
            let x = g(m, k, i);
            let y = g(m, k, j);
            *m.get_mut(k, i) = self.c * x - self.s * y;
            *m.get_mut(k, j) = self.s * x + self.c * y;
        }
    }
}
