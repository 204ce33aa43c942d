use crate::traits::{FloatScalar, Scalar};

use super::vector::DynVector;
use super::DynMatrix;

// ── Vector norms ────────────────────────────────────────────────────

impl<T: Scalar> DynVector<T> {
    /// Squared L2 norm.
    ///
    /// ```
    /// use eigenkit::DynVector;
    /// let v = DynVector::from_slice(&[3.0, 4.0]);
    /// assert_eq!(v.norm_squared(), 25.0);
    /// ```
    pub fn norm_squared(&self) -> T {
        self.dot(self)
    }
}

impl<T: FloatScalar> DynVector<T> {
    /// L2 norm.
    ///
    /// ```
    /// use eigenkit::DynVector;
    /// let v = DynVector::from_slice(&[3.0_f64, 4.0]);
    /// assert!((v.norm() - 5.0).abs() < 1e-12);
    /// ```
    pub fn norm(&self) -> T {
        self.norm_squared().sqrt()
    }

    /// Largest absolute entry.
    pub fn norm_inf(&self) -> T {
        self.as_slice()
            .iter()
            .fold(T::zero(), |m, &x| m.max(x.abs()))
    }
}

// ── Matrix norms ────────────────────────────────────────────────────

impl<T: FloatScalar> DynMatrix<T> {
    /// Frobenius norm (square root of the sum of squares).
    ///
    /// ```
    /// use eigenkit::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
    /// assert!((m.frobenius_norm() - 30.0_f64.sqrt()).abs() < 1e-12);
    /// ```
    pub fn frobenius_norm(&self) -> T {
        let mut sum = T::zero();
        for &x in &self.data {
            sum = sum + x * x;
        }
        sum.sqrt()
    }

    /// Infinity norm (maximum absolute row sum).
    ///
    /// ```
    /// use eigenkit::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0_f64, -2.0, 3.0, 4.0]);
    /// assert!((m.norm_inf() - 7.0).abs() < 1e-12);
    /// ```
    pub fn norm_inf(&self) -> T {
        let mut max = T::zero();
        for i in 0..self.nrows {
            let row_sum = self
                .row_slice(i)
                .iter()
                .fold(T::zero(), |s, &x| s + x.abs());
            if row_sum > max {
                max = row_sum;
            }
        }
        max
    }

    /// Largest absolute element-wise difference, `max |a_ij - b_ij|`.
    ///
    /// Panics on a dimension mismatch.
    ///
    /// ```
    /// use eigenkit::DynMatrix;
    /// let a = DynMatrix::from_rows(1, 3, &[1.0_f64, 2.0, 3.0]);
    /// let b = DynMatrix::from_rows(1, 3, &[1.0_f64, 2.5, 2.0]);
    /// assert_eq!(a.max_abs_diff(&b), 1.0);
    /// ```
    pub fn max_abs_diff(&self, other: &Self) -> T {
        assert_eq!(
            (self.nrows, self.ncols),
            (other.nrows, other.ncols),
            "dimension mismatch: {}x{} vs {}x{}",
            self.nrows, self.ncols, other.nrows, other.ncols,
        );
        self.data
            .iter()
            .zip(other.data.iter())
            .fold(T::zero(), |m, (&a, &b)| m.max((a - b).abs()))
    }
}
