use core::ops::Range;

use crate::linalg::smallest_tolerance;
use crate::traits::{g, FloatScalar, MatrixMut};

/// Turn `x` into a unit Householder vector in place.
///
/// On return `x` holds `v` with `‖v‖ = 1`, and the reflection `I - 2vvᵗ` maps
/// the input `x` onto `β e₀`, where `β = -sign(x₀)‖x‖` (`sign(0) = +1`).
/// Returns `β`.
///
/// A zero input yields `v = e₀` and `β = 0`. When `v` is too small to be
/// normalized safely it is first rescaled by its largest component.
///
/// ```
/// use eigenkit::linalg::make_householder;
///
/// let mut v = [3.0_f64, 4.0];
/// let beta = make_householder(&mut v);
/// assert!((beta + 5.0).abs() < 1e-12);
/// let norm = (v[0] * v[0] + v[1] * v[1]).sqrt();
/// assert!((norm - 1.0).abs() < 1e-12);
/// ```
pub fn make_householder<T: FloatScalar>(x: &mut [T]) -> T {
    if x.is_empty() {
        return T::zero();
    }

    let norm = norm2(x);
    if norm == T::zero() {
        x.fill(T::zero());
        x[0] = T::one();
        return T::zero();
    }

    let sign = x[0].sign_or_one();
    x[0] = x[0] + sign * norm;
    let beta = -sign * norm;

    let mut vnorm = norm2(x);
    if vnorm < smallest_tolerance::<T>() {
        let scale = x.iter().fold(T::zero(), |m, &v| m.max(v.abs()));
        if scale == T::zero() {
            x.fill(T::zero());
            x[0] = T::one();
            return beta;
        }
        for v in x.iter_mut() {
            *v = *v / scale;
        }
        vnorm = norm2(x);
    }
    for v in x.iter_mut() {
        *v = *v / vnorm;
    }
    beta
}

/// `A ← (I - 2vvᵗ) A` on rows `row .. row + v.len()`, restricted to `cols`.
pub fn apply_householder_left<T: FloatScalar>(
    v: &[T],
    a: &mut impl MatrixMut<T>,
    row: usize,
    cols: Range<usize>,
) {
    debug_assert!(row + v.len() <= a.nrows());
    let two = T::two();
    for j in cols {
        let mut dot = T::zero();
        for (k, &vk) in v.iter().enumerate() {
            dot = dot + vk * g(a, row + k, j);
        }
        if dot == T::zero() {
            continue;
        }
        let f = two * dot;
        for (k, &vk) in v.iter().enumerate() {
            *a.get_mut(row + k, j) = g(a, row + k, j) - f * vk;
        }
    }
}

/// `A ← A (I - 2vvᵗ)` on columns `col .. col + v.len()`, restricted to `rows`.
pub fn apply_householder_right<T: FloatScalar>(
    v: &[T],
    a: &mut impl MatrixMut<T>,
    col: usize,
    rows: Range<usize>,
) {
    debug_assert!(col + v.len() <= a.ncols());
    let two = T::two();
    for i in rows {
        let mut dot = T::zero();
        for (k, &vk) in v.iter().enumerate() {
            dot = dot + g(a, i, col + k) * vk;
        }
        if dot == T::zero() {
            continue;
        }
        let f = two * dot;
        for (k, &vk) in v.iter().enumerate() {
            *a.get_mut(i, col + k) = g(a, i, col + k) - f * vk;
        }
    }
}

/// Euclidean norm with `hypot` accumulation to avoid overflow.
#[inline]
fn norm2<T: FloatScalar>(x: &[T]) -> T {
    x.iter().fold(T::zero(), |acc, &v| acc.hypot(v))
}
