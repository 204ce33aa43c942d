use alloc::vec::Vec;
use core::fmt::{self, Write as _};

use crate::traits::{FloatScalar, Scalar};

use super::vector::DynVector;
use super::DynMatrix;

// ── Row permutation and column access ───────────────────────────────

impl<T> DynMatrix<T> {
    /// Swap two rows in place.
    ///
    /// ```
    /// use eigenkit::DynMatrix;
    /// let mut m = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// m.swap_rows(0, 1);
    /// assert_eq!(m[(0, 0)], 3.0);
    /// assert_eq!(m[(1, 0)], 1.0);
    /// ```
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a != b {
            let n = self.ncols;
            for j in 0..n {
                self.data.swap(a * n + j, b * n + j);
            }
        }
    }
}

impl<T: Scalar> DynMatrix<T> {
    /// Extract column `j` as a `DynVector`.
    ///
    /// ```
    /// use eigenkit::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// let c = m.col(1);
    /// assert_eq!(c[0], 2.0);
    /// assert_eq!(c[1], 4.0);
    /// ```
    pub fn col(&self, j: usize) -> DynVector<T> {
        let mut data = Vec::with_capacity(self.nrows);
        for i in 0..self.nrows {
            data.push(self[(i, j)]);
        }
        DynVector::from_vec(data)
    }
}

// ── Test matrices ───────────────────────────────────────────────────

impl<T: FloatScalar> DynMatrix<T> {
    /// Companion matrix of the polynomial `c₀ + c₁x + … + cₙxⁿ`.
    ///
    /// `coeffs` is given in ascending order of degree. The result is the
    /// `n x n` Frobenius companion form: ones on the sub-diagonal and
    /// `-cᵢ / cₙ` in the last column. It is upper Hessenberg and its
    /// eigenvalues are the roots of the polynomial.
    ///
    /// Panics if fewer than two coefficients are given or the leading
    /// coefficient is zero.
    ///
    /// ```
    /// use eigenkit::DynMatrix;
    /// // (x - 1)(x - 2) = x² - 3x + 2
    /// let c = DynMatrix::companion(&[2.0_f64, -3.0, 1.0]);
    /// assert_eq!(c.trace(), 3.0);
    /// assert!((c.det() - 2.0).abs() < 1e-12);
    /// ```
    pub fn companion(coeffs: &[T]) -> Self {
        assert!(coeffs.len() >= 2, "companion matrix needs a degree >= 1 polynomial");
        let n = coeffs.len() - 1;
        let lead = coeffs[n];
        assert!(lead != T::zero(), "leading coefficient must be non-zero");
        let mut m = Self::zeros(n, n, T::zero());
        for i in 1..n {
            m[(i, i - 1)] = T::one();
        }
        for i in 0..n {
            m[(i, n - 1)] = -coeffs[i] / lead;
        }
        m
    }

    /// `n x n` Hilbert matrix, `h_ij = 1 / (i + j + 1)`.
    ///
    /// Symmetric positive definite and notoriously ill-conditioned.
    pub fn hilbert(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| T::one() / T::lit((i + j + 1) as f64))
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl<T: fmt::Display> fmt::Display for DynMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.nrows;
        let n = self.ncols;

        let mut widths: Vec<usize> = alloc::vec![0; n];
        for j in 0..n {
            for i in 0..m {
                let w = WriteCounting::count(|wc| write!(wc, "{}", self[(i, j)]));
                widths[j] = widths[j].max(w);
            }
        }

        for i in 0..m {
            write!(f, "│")?;
            for j in 0..n {
                if j > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{:>width$}", self[(i, j)], width = widths[j])?;
            }
            write!(f, "│")?;
            if i + 1 < m {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

struct WriteCounting {
    count: usize,
}

impl WriteCounting {
    fn count(f: impl FnOnce(&mut Self) -> fmt::Result) -> usize {
        let mut wc = WriteCounting { count: 0 };
        let _ = f(&mut wc);
        wc.count
    }
}

impl fmt::Write for WriteCounting {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.count += s.chars().count();
        Ok(())
    }
}
