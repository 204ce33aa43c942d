use core::fmt::Debug;
use num_traits::{Float, Num, NumCast, One, Zero};

/// Trait for types that can be stored in a [`DynMatrix`](crate::DynMatrix).
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for real floating-point matrix elements.
///
/// Required by everything that needs `sqrt`, `abs`, `hypot` or ordered
/// comparisons: reflections, rotations, norms and the eigen-solvers.
pub trait FloatScalar: Scalar + Float {
    /// `2` in the element type.
    #[inline]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// `1/2` in the element type.
    #[inline]
    fn half() -> Self {
        Self::one() / Self::two()
    }

    /// Converts an `f64` literal into the element type.
    ///
    /// Only used for the small empirical constants of the iterations, all of
    /// which are exactly representable in `f32`.
    #[inline]
    fn lit(x: f64) -> Self {
        <Self as NumCast>::from(x).unwrap_or_else(Self::nan)
    }

    /// `+1` for non-negative values (including `+0` and `-0`), `-1` otherwise.
    ///
    /// Unlike [`Float::signum`], zero maps to one.
    #[inline]
    fn sign_or_one(self) -> Self {
        if self >= Self::zero() {
            Self::one()
        } else {
            -Self::one()
        }
    }
}

impl<T: Scalar + Float> FloatScalar for T {}

/// Read-only access to a matrix-like type.
///
/// All linear algebra free functions are generic over this trait, so they can
/// be run on any row-major storage, not only [`DynMatrix`](crate::DynMatrix).
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;
}

/// Mutable access to a matrix-like type.
///
/// Extends `MatrixRef` with mutable element access, enabling the in-place
/// reductions and sweeps to work generically.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;

    /// Swap columns `a` and `b` in place.
    fn swap_cols(&mut self, a: usize, b: usize)
    where
        T: Copy,
    {
        if a == b {
            return;
        }
        for i in 0..self.nrows() {
            let tmp = *self.get(i, a);
            *self.get_mut(i, a) = *self.get(i, b);
            *self.get_mut(i, b) = tmp;
        }
    }
}

/// Read an element by value.
#[inline]
pub(crate) fn g<T: Copy>(m: &impl MatrixRef<T>, i: usize, j: usize) -> T {
    *m.get(i, j)
}
