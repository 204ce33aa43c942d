use alloc::vec::Vec;

use num_complex::Complex;

use crate::dynmatrix::DynMatrix;
use crate::linalg::schur::RealSchurDecomposition;
use crate::linalg::symmetric_eigen::SymmetricEigen;
use crate::linalg::{default_tolerance, DEFAULT_ITERATIONS_PER_ROW};
use crate::traits::FloatScalar;

/// Eigenvalues from whichever engine converges: the symmetric one for
/// symmetric input, otherwise (or as a fallback) the real Schur one.
fn spectrum<T: FloatScalar>(a: &DynMatrix<T>, max_iter: usize) -> Option<Vec<Complex<T>>> {
    if !a.is_square() {
        return None;
    }
    if a.is_symmetric(default_tolerance::<T>() * a.norm_inf()) {
        let eig = SymmetricEigen::new(a, max_iter);
        if let Some(vals) = eig.eigenvalues() {
            return Some(vals.iter().map(|&v| Complex::new(v, T::zero())).collect());
        }
        #[cfg(feature = "log")]
        log::debug!("spectrum: symmetric iteration failed, falling back to Schur");
    }
    let schur = RealSchurDecomposition::new(a, max_iter);
    if schur.is_converged() {
        Some(schur.eigenvalues())
    } else {
        None
    }
}

/// Ratio of the largest to the smallest eigenvalue magnitude, taken over the
/// real parts.
///
/// Returns NaN for non-square input or when no engine converges within
/// `max_iter` sweeps, and infinity for a singular matrix.
///
/// ```
/// use eigenkit::DynMatrix;
/// use eigenkit::linalg::condition_number;
///
/// let a = DynMatrix::from_rows(2, 2, &[4.0_f64, 0.0, 0.0, 0.5]);
/// assert!((condition_number(&a, 10) - 8.0).abs() < 1e-12);
/// ```
pub fn condition_number<T: FloatScalar>(a: &DynMatrix<T>, max_iter: usize) -> T {
    let Some(values) = spectrum(a, max_iter) else {
        return T::nan();
    };
    if values.is_empty() {
        return T::nan();
    }
    let (min, max) = values.iter().fold((T::infinity(), T::zero()), |(lo, hi), z| {
        let m = z.re.abs();
        (lo.min(m), hi.max(m))
    });
    max / min
}

/// Largest eigenvalue modulus.
///
/// Returns NaN for non-square input or when no engine converges within
/// `max_iter` sweeps.
///
/// ```
/// use eigenkit::DynMatrix;
/// use eigenkit::linalg::spectral_radius;
///
/// // rotation by 90° scaled by 2: eigenvalues ±2i
/// let a = DynMatrix::from_rows(2, 2, &[0.0_f64, -2.0, 2.0, 0.0]);
/// assert!((spectral_radius(&a, 10) - 2.0).abs() < 1e-12);
/// ```
pub fn spectral_radius<T: FloatScalar>(a: &DynMatrix<T>, max_iter: usize) -> T {
    let Some(values) = spectrum(a, max_iter) else {
        return T::nan();
    };
    if values.is_empty() {
        return T::nan();
    }
    values
        .iter()
        .fold(T::zero(), |r, z| r.max(z.re.hypot(z.im)))
}

impl<T: FloatScalar> DynMatrix<T> {
    /// [`condition_number`] with `DEFAULT_ITERATIONS_PER_ROW` sweeps per row.
    pub fn condition_number(&self) -> T {
        condition_number(self, DEFAULT_ITERATIONS_PER_ROW * self.nrows())
    }

    /// [`spectral_radius`] with `DEFAULT_ITERATIONS_PER_ROW` sweeps per row.
    pub fn spectral_radius(&self) -> T {
        spectral_radius(self, DEFAULT_ITERATIONS_PER_ROW * self.nrows())
    }
}
