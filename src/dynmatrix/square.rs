use alloc::vec::Vec;

use crate::traits::{FloatScalar, Scalar};

use super::vector::DynVector;
use super::DynMatrix;

impl<T: Scalar> DynMatrix<T> {
    /// Sum of diagonal elements.
    ///
    /// ```
    /// use eigenkit::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(m.trace(), 5.0);
    /// ```
    pub fn trace(&self) -> T {
        let n = self.nrows.min(self.ncols);
        let mut sum = T::zero();
        for i in 0..n {
            sum = sum + self[(i, i)];
        }
        sum
    }

    /// Extract the diagonal as a `DynVector`.
    pub fn diag(&self) -> DynVector<T> {
        let n = self.nrows.min(self.ncols);
        let mut data = Vec::with_capacity(n);
        for i in 0..n {
            data.push(self[(i, i)]);
        }
        DynVector::from_vec(data)
    }

    /// Create a square diagonal matrix from a vector.
    ///
    /// ```
    /// use eigenkit::{DynMatrix, DynVector};
    /// let v = DynVector::from_slice(&[2.0, 3.0]);
    /// let m = DynMatrix::from_diag(&v);
    /// assert_eq!(m[(0, 0)], 2.0);
    /// assert_eq!(m[(1, 1)], 3.0);
    /// assert_eq!(m[(0, 1)], 0.0);
    /// ```
    pub fn from_diag(v: &DynVector<T>) -> Self {
        let n = v.len();
        let mut m = Self::zeros(n, n, T::zero());
        for i in 0..n {
            m[(i, i)] = v[i];
        }
        m
    }
}

// ── Structure predicates ────────────────────────────────────────────

impl<T: FloatScalar> DynMatrix<T> {
    /// Whether `|a_ij - a_ji| <= tol` for every pair. Non-square matrices
    /// are never symmetric.
    ///
    /// ```
    /// use eigenkit::DynMatrix;
    /// let sym = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 2.0, 3.0]);
    /// assert!(sym.is_symmetric(0.0));
    /// ```
    pub fn is_symmetric(&self, tol: T) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.nrows;
        for i in 0..n {
            for j in (i + 1)..n {
                if (self[(i, j)] - self[(j, i)]).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Whether every entry below the first sub-diagonal is within `tol` of zero.
    pub fn is_hessenberg(&self, tol: T) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.nrows;
        for i in 2..n {
            for j in 0..(i - 1) {
                if self[(i, j)].abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Whether the matrix is symmetric and banded with only the diagonal,
    /// the first sub-diagonal and the first super-diagonal populated.
    pub fn is_tridiagonal(&self, tol: T) -> bool {
        self.is_hessenberg(tol) && self.is_symmetric(tol)
    }

    /// Whether `Qᵗ Q` is within `tol` of the identity, entry by entry.
    pub fn is_orthogonal(&self, tol: T) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.nrows;
        for i in 0..n {
            for j in i..n {
                let mut dot = T::zero();
                for k in 0..n {
                    dot = dot + self[(k, i)] * self[(k, j)];
                }
                let expected = if i == j { T::one() } else { T::zero() };
                if (dot - expected).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Whether the matrix is upper quasi-triangular: upper Hessenberg with no
    /// two consecutive sub-diagonal entries above `tol`, so the diagonal is a
    /// sequence of 1×1 and 2×2 blocks.
    ///
    /// ```
    /// use eigenkit::DynMatrix;
    /// let d = DynMatrix::from_rows(3, 3, &[
    ///     1.0, 2.0, 3.0,
    ///     -1.0, 1.0, 4.0,
    ///     0.0, 0.0, 5.0,
    /// ]);
    /// assert!(d.is_quasi_triangular(1e-12));
    /// ```
    pub fn is_quasi_triangular(&self, tol: T) -> bool {
        if !self.is_hessenberg(tol) {
            return false;
        }
        let n = self.nrows;
        for i in 1..n.saturating_sub(1) {
            if self[(i, i - 1)].abs() > tol && self[(i + 1, i)].abs() > tol {
                return false;
            }
        }
        true
    }

    /// Determinant via Gaussian elimination with partial pivoting.
    ///
    /// Panics if the matrix is not square.
    ///
    /// ```
    /// use eigenkit::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[3.0_f64, 8.0, 4.0, 6.0]);
    /// assert!((m.det() - (-14.0)).abs() < 1e-12);
    /// ```
    pub fn det(&self) -> T {
        assert!(self.is_square(), "determinant requires a square matrix");
        let n = self.nrows;
        let mut a = self.clone();
        let mut sign = T::one();

        for col in 0..n {
            let mut max_row = col;
            let mut max_val = a[(col, col)].abs();
            for row in (col + 1)..n {
                let val = a[(row, col)].abs();
                if val > max_val {
                    max_val = val;
                    max_row = row;
                }
            }

            if max_val == T::zero() {
                return T::zero();
            }

            if max_row != col {
                a.swap_rows(col, max_row);
                sign = -sign;
            }

            let pivot = a[(col, col)];
            for row in (col + 1)..n {
                let factor = a[(row, col)] / pivot;
                for j in (col + 1)..n {
                    let val = a[(col, j)];
                    a[(row, j)] = a[(row, j)] - factor * val;
                }
                a[(row, col)] = T::zero();
            }
        }

        (0..n).fold(sign, |d, i| d * a[(i, i)])
    }
}
