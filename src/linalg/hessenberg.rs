use crate::dynmatrix::DynVector;
use crate::linalg::householder::{apply_householder_left, apply_householder_right, make_householder};
use crate::traits::{g, FloatScalar, MatrixMut};

/// Reduce a square matrix to upper Hessenberg form via Householder similarity
/// transforms.
///
/// On return:
/// - `a` is overwritten with the upper Hessenberg matrix H, with entries below
///   the first sub-diagonal set to exact zeros
/// - `q`, if given, is overwritten with the orthogonal factor Q
///
/// The result satisfies `A = Q H Qᵗ`. Columns that are already reduced are
/// left untouched, so Hessenberg input comes back unchanged with `Q = I`.
///
/// ```
/// use eigenkit::DynMatrix;
/// use eigenkit::linalg::hessenberg;
///
/// let a0 = DynMatrix::from_rows(3, 3, &[4.0_f64, 1.0, -2.0, 1.0, 2.0, 0.0, -2.0, 0.0, 3.0]);
/// let mut h = a0.clone();
/// let mut q = DynMatrix::zeros(3, 3, 0.0);
/// hessenberg(&mut h, Some(&mut q));
/// assert_eq!(h[(2, 0)], 0.0);
/// let back = &(&q * &h) * &q.transpose();
/// assert!(back.max_abs_diff(&a0) < 1e-12);
/// ```
pub fn hessenberg<T: FloatScalar, M: MatrixMut<T>>(a: &mut M, mut q: Option<&mut M>) {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "hessenberg requires a square matrix");

    if let Some(q) = q.as_deref_mut() {
        assert_eq!((q.nrows(), q.ncols()), (n, n), "Q must be {}x{}", n, n);
        for i in 0..n {
            for j in 0..n {
                *q.get_mut(i, j) = if i == j { T::one() } else { T::zero() };
            }
        }
    }

    let mut v = DynVector::zeros(n, T::zero());
    for k in 0..n.saturating_sub(2) {
        if ((k + 2)..n).all(|i| g(a, i, k) == T::zero()) {
            continue;
        }

        let len = n - k - 1;
        let x = &mut v.as_mut_slice()[..len];
        for (idx, xi) in x.iter_mut().enumerate() {
            *xi = g(a, k + 1 + idx, k);
        }
        let beta = make_householder(x);

        apply_householder_left(x, a, k + 1, k..n);
        apply_householder_right(x, a, k + 1, 0..n);
        if let Some(q) = q.as_deref_mut() {
            apply_householder_right(x, q, k + 1, 0..n);
        }

        *a.get_mut(k + 1, k) = beta;
        for i in (k + 2)..n {
            *a.get_mut(i, k) = T::zero();
        }
    }
}

/// Reduce a symmetric matrix to symmetric tridiagonal form, `A = Q T Qᵗ`.
///
/// Runs [`hessenberg`] and then enforces the band exactly: entries above the
/// first super-diagonal are zeroed and the super-diagonal is mirrored from the
/// sub-diagonal.
pub fn tridiagonalize<T: FloatScalar, M: MatrixMut<T>>(a: &mut M, q: Option<&mut M>) {
    hessenberg(a, q);
    let n = a.nrows();
    for i in 0..n {
        for j in (i + 2)..n {
            *a.get_mut(i, j) = T::zero();
        }
        if i + 1 < n {
            *a.get_mut(i, i + 1) = g(a, i + 1, i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DynMatrix;

    const TOL: f64 = 1e-10;

    fn verify_similarity(orig: &DynMatrix<f64>, h: &DynMatrix<f64>, q: &DynMatrix<f64>) {
        let back = &(q * h) * &q.transpose();
        let diff = back.max_abs_diff(orig);
        assert!(diff < TOL, "‖A - QHQᵗ‖ = {}", diff);
        assert!(q.is_orthogonal(TOL), "Q not orthogonal");
    }

    #[test]
    fn hessenberg_3x3() {
        let orig = DynMatrix::from_rows(
            3,
            3,
            &[4.0_f64, 1.0, -2.0, 1.0, 2.0, 0.0, -2.0, 0.0, 3.0],
        );
        let mut a = orig.clone();
        let mut q = DynMatrix::zeros(3, 3, 0.0);
        hessenberg(&mut a, Some(&mut q));
        assert!(a.is_hessenberg(0.0));
        verify_similarity(&orig, &a, &q);
    }

    #[test]
    fn hessenberg_5x5_exact_zeros() {
        let orig = DynMatrix::from_fn(5, 5, |i, j| ((i * 7 + j * 3) % 11) as f64 - 5.0);
        let mut a = orig.clone();
        let mut q = DynMatrix::zeros(5, 5, 0.0);
        hessenberg(&mut a, Some(&mut q));
        for i in 2..5 {
            for j in 0..i - 1 {
                assert_eq!(a[(i, j)], 0.0, "H[({},{})]", i, j);
            }
        }
        verify_similarity(&orig, &a, &q);
    }

    #[test]
    fn already_hessenberg_is_untouched() {
        let orig = DynMatrix::from_rows(
            3,
            3,
            &[1.0_f64, 2.0, 3.0, 0.5, 4.0, 5.0, 0.0, -1.0, 6.0],
        );
        let mut a = orig.clone();
        let mut q = DynMatrix::zeros(3, 3, 0.0);
        hessenberg(&mut a, Some(&mut q));
        assert_eq!(a, orig);
        assert_eq!(q, DynMatrix::eye(3, 0.0));
    }

    #[test]
    fn without_accumulator() {
        let orig = DynMatrix::from_fn(4, 4, |i, j| (i + 2 * j) as f64 + if i == j { 3.0 } else { 0.0 });
        let mut a = orig.clone();
        let mut b = orig.clone();
        let mut q = DynMatrix::zeros(4, 4, 0.0);
        hessenberg(&mut a, None);
        hessenberg(&mut b, Some(&mut q));
        assert_eq!(a, b);
    }

    #[test]
    fn tridiagonal_from_symmetric() {
        let orig = DynMatrix::from_rows(
            4,
            4,
            &[
                4.0_f64, 1.0, -2.0, 2.0, //
                1.0, 2.0, 0.0, 1.0, //
                -2.0, 0.0, 3.0, -2.0, //
                2.0, 1.0, -2.0, -1.0,
            ],
        );
        let mut t = orig.clone();
        let mut q = DynMatrix::zeros(4, 4, 0.0);
        tridiagonalize(&mut t, Some(&mut q));
        assert!(t.is_tridiagonal(0.0));
        verify_similarity(&orig, &t, &q);
    }

    #[test]
    fn tiny_sizes() {
        let mut a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
        let mut q = DynMatrix::zeros(2, 2, 0.0);
        hessenberg(&mut a, Some(&mut q));
        assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(q, DynMatrix::eye(2, 0.0));

        let mut e = DynMatrix::<f64>::zeros(0, 0, 0.0);
        hessenberg(&mut e, None);
    }
}
