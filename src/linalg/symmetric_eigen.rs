use alloc::vec::Vec;

use crate::dynmatrix::DynMatrix;
use crate::linalg::givens::Givens;
use crate::linalg::hessenberg::tridiagonalize;
use crate::linalg::jacobi::jacobi_rotation;
use crate::linalg::{default_tolerance, Convergence, LinalgError, DEFAULT_ITERATIONS_PER_ROW};
use crate::traits::{FloatScalar, MatrixMut};

#[inline]
fn negligible<T: FloatScalar>(e: T, a: T, b: T, tolerance: T) -> bool {
    e.abs() <= tolerance * (a.abs() + b.abs())
}

/// Rotate rows and columns `k`, `k+1` of the symmetric tridiagonal matrix by
/// `G T Gᵗ`, with `G = [[c, -s], [s, c]]`.
#[inline]
fn rotate_pair<T: FloatScalar>(diag: &mut [T], off: &mut [T], k: usize, c: T, s: T) {
    let a = diag[k];
    let b = diag[k + 1];
    let e = off[k];
    let cs2e = T::two() * c * s * e;
    diag[k] = c * c * a - cs2e + s * s * b;
    diag[k + 1] = s * s * a + cs2e + c * c * b;
    off[k] = c * s * (a - b) + (c * c - s * s) * e;
}

/// Implicit single-shift QR iteration with Wilkinson shift on a symmetric
/// tridiagonal matrix.
///
/// - `diag[0..n]`: diagonal entries (overwritten with eigenvalues, sorted
///   ascending on convergence)
/// - `off[0..n-1]`: sub-diagonal entries (destroyed)
/// - `q`: if given, rotations are accumulated as `Q ← Q Gᵗ`, so that
///   `A = Q T Qᵗ` keeps holding for the `Q` passed in; its columns are
///   permuted along with the sorted eigenvalues
/// - `max_iter`: maximum number of sweeps
///
/// Off-diagonal entries are deflated once
/// `|off[i]| <= tolerance * (|diag[i]| + |diag[i+1]|)`. A trailing unreduced
/// 2×2 block is diagonalized exactly by a Jacobi rotation.
pub fn tridiagonal_qr<T: FloatScalar, M: MatrixMut<T>>(
    diag: &mut [T],
    off: &mut [T],
    mut q: Option<&mut M>,
    tolerance: T,
    max_iter: usize,
) -> Convergence {
    let n = diag.len();
    if n <= 1 {
        return Convergence::Converged { iterations: 0 };
    }
    assert!(off.len() + 1 >= n, "off-diagonal needs {} entries", n - 1);

    let mut hi = n - 1;
    let mut iter = 0usize;

    loop {
        while hi > 0 && negligible(off[hi - 1], diag[hi - 1], diag[hi], tolerance) {
            off[hi - 1] = T::zero();
            hi -= 1;
        }
        if hi == 0 {
            break;
        }
        if iter == max_iter {
            #[cfg(feature = "log")]
            log::warn!(
                "tridiagonal_qr: budget of {} sweeps exhausted with {} rows active",
                max_iter,
                hi + 1
            );
            return Convergence::NotConverged {
                iterations: iter,
                active_size: hi + 1,
            };
        }
        iter += 1;

        let mut lo = hi - 1;
        while lo > 0 && !negligible(off[lo - 1], diag[lo - 1], diag[lo], tolerance) {
            lo -= 1;
        }
        if lo > 0 {
            off[lo - 1] = T::zero();
        }

        if lo + 1 == hi {
            let (c, s) = jacobi_rotation(diag[lo], diag[hi], off[lo]);
            rotate_pair(diag, off, lo, c, s);
            off[lo] = T::zero();
            if let Some(q) = q.as_deref_mut() {
                let rows = q.nrows();
                Givens::from_cs(c, s).apply_right_transpose(q, lo, hi, 0..rows);
            }
            continue;
        }

        // Wilkinson shift: eigenvalue of the trailing 2×2 block nearer diag[hi].
        let d = (diag[hi - 1] - diag[hi]) * T::half();
        let b = off[hi - 1];
        let shift = if d == T::zero() {
            diag[hi] - b.abs()
        } else {
            diag[hi] - b / (d + d.sign_or_one() * d.hypot(b)) * b
        };

        let mut x = diag[lo] - shift;
        let mut y = off[lo];
        for k in lo..hi {
            let rot = Givens::new(x, y);
            if k > lo {
                off[k - 1] = rot.r;
            }
            rotate_pair(diag, off, k, rot.c, rot.s);

            if k + 1 < hi {
                // G on rows k, k+1 pushes the bulge to (k+2, k).
                let e_next = off[k + 1];
                x = off[k];
                y = -rot.s * e_next;
                off[k + 1] = rot.c * e_next;
            }

            if let Some(q) = q.as_deref_mut() {
                let rows = q.nrows();
                rot.apply_right_transpose(q, k, k + 1, 0..rows);
            }
        }
    }

    #[cfg(feature = "log")]
    log::debug!("tridiagonal_qr: {}x{} converged after {} sweeps", n, n, iter);

    sort_eigen(diag, q);
    Convergence::Converged { iterations: iter }
}

/// Sort eigenvalues ascending and permute eigenvector columns to match.
fn sort_eigen<T: FloatScalar, M: MatrixMut<T>>(diag: &mut [T], mut q: Option<&mut M>) {
    let n = diag.len();
    for i in 0..n {
        let mut min_idx = i;
        for j in (i + 1)..n {
            if diag[j] < diag[min_idx] {
                min_idx = j;
            }
        }
        if min_idx != i {
            diag.swap(i, min_idx);
            if let Some(q) = q.as_deref_mut() {
                q.swap_cols(i, min_idx);
            }
        }
    }
}

/// Symmetric eigendecomposition of a real matrix.
///
/// Computes `A = Q diag(λ) Qᵗ` with orthogonal Q. Only the symmetric part of
/// the input is meaningful. Eigenvalues are sorted in ascending order;
/// eigenvectors are the columns of Q.
///
/// When the sweep budget runs out, no partial result is exposed:
/// [`eigenvalues`](Self::eigenvalues) and [`eigenvectors`](Self::eigenvectors)
/// return `None` and [`status`](Self::status) reports how far it got.
///
/// # Example
///
/// ```
/// use eigenkit::DynMatrix;
/// use eigenkit::linalg::SymmetricEigen;
///
/// let a = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 1.0, 2.0]);
/// let eig = SymmetricEigen::new(&a, 20);
/// let vals = eig.eigenvalues().unwrap();
/// assert!((vals[0] - 1.0).abs() < 1e-12);
/// assert!((vals[1] - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct SymmetricEigen<T> {
    eigenvalues: Option<Vec<T>>,
    eigenvectors: Option<DynMatrix<T>>,
    tolerance: T,
    status: Convergence,
}

impl<T: FloatScalar> SymmetricEigen<T> {
    /// An empty decomposition, to be filled by [`factorize`](Self::factorize).
    pub fn empty() -> Self {
        Self {
            eigenvalues: None,
            eigenvectors: None,
            tolerance: default_tolerance(),
            status: Convergence::Converged { iterations: 0 },
        }
    }

    /// Decompose `a` with at most `max_iter` sweeps.
    ///
    /// Panics if `a` is not square.
    pub fn new(a: &DynMatrix<T>, max_iter: usize) -> Self {
        let mut eig = Self::empty();
        eig.factorize(a, max_iter);
        eig
    }

    /// Builder-style deflation tolerance.
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the relative deflation tolerance for later
    /// [`factorize`](Self::factorize) calls.
    pub fn set_tolerance(&mut self, tolerance: T) {
        self.tolerance = tolerance;
    }

    /// The relative deflation tolerance in use.
    pub fn tolerance(&self) -> T {
        self.tolerance
    }

    /// Decompose `a`, replacing any previous result. `a` itself is not
    /// modified.
    ///
    /// Panics if `a` is not square.
    pub fn factorize(&mut self, a: &DynMatrix<T>, max_iter: usize) -> Convergence {
        assert!(
            a.is_square(),
            "symmetric eigendecomposition requires a square matrix, got {}x{}",
            a.nrows(),
            a.ncols()
        );
        let n = a.nrows();
        self.eigenvalues = None;
        self.eigenvectors = None;

        let mut t = a.clone();
        let mut q = DynMatrix::eye(n, T::zero());
        if !t.is_tridiagonal(T::zero()) {
            tridiagonalize(&mut t, Some(&mut q));
        }

        let mut diag = t.diag().into_vec();
        let mut off: Vec<T> = (1..n).map(|i| t[(i, i - 1)]).collect();
        self.status = tridiagonal_qr(&mut diag, &mut off, Some(&mut q), self.tolerance, max_iter);

        if self.status.is_converged() {
            self.eigenvalues = Some(diag);
            self.eigenvectors = Some(q);
        }
        self.status
    }

    /// Eigenvalues in ascending order, or `None` if the iteration did not
    /// converge.
    #[inline]
    pub fn eigenvalues(&self) -> Option<&[T]> {
        self.eigenvalues.as_deref()
    }

    /// Orthonormal eigenvectors as columns, matching
    /// [`eigenvalues`](Self::eigenvalues), or `None` if the iteration did not
    /// converge.
    #[inline]
    pub fn eigenvectors(&self) -> Option<&DynMatrix<T>> {
        self.eigenvectors.as_ref()
    }

    /// Outcome of the last [`factorize`](Self::factorize).
    #[inline]
    pub fn status(&self) -> Convergence {
        self.status
    }

    /// `true` when eigenvalues and eigenvectors are available.
    #[inline]
    pub fn is_converged(&self) -> bool {
        self.status.is_converged()
    }
}

impl<T: FloatScalar> Default for SymmetricEigen<T> {
    fn default() -> Self {
        Self::empty()
    }
}

// ── Convenience methods on DynMatrix ────────────────────────────────

impl<T: FloatScalar> DynMatrix<T> {
    /// Symmetric eigendecomposition with the default tolerance and a budget
    /// of `DEFAULT_ITERATIONS_PER_ROW` sweeps per row.
    ///
    /// ```
    /// use eigenkit::DynMatrix;
    /// let a = DynMatrix::from_rows(3, 3, &[2.0_f64, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 2.0]);
    /// let eig = a.eig_symmetric().unwrap();
    /// let vals = eig.eigenvalues().unwrap();
    /// assert!((vals[0] - (2.0 - 2.0_f64.sqrt())).abs() < 1e-12);
    /// ```
    pub fn eig_symmetric(&self) -> Result<SymmetricEigen<T>, LinalgError> {
        if !self.is_square() {
            return Err(LinalgError::NotSquare {
                rows: self.nrows(),
                cols: self.ncols(),
            });
        }
        Ok(SymmetricEigen::new(
            self,
            DEFAULT_ITERATIONS_PER_ROW * self.nrows(),
        ))
    }
}
