//! Eigenvalue machinery: reflection and rotation primitives, Hessenberg
//! reduction, and the two iterative engines built on them.
//!
//! Free functions operate on `&mut impl MatrixMut<T>` for in-place use; the
//! wrapper structs [`RealSchurDecomposition`] and [`SymmetricEigen`] own
//! their working matrices and offer a higher-level API.

pub mod eigenvalues;
pub mod givens;
pub mod hessenberg;
pub mod householder;
pub mod jacobi;
pub mod schur;
pub mod spectrum;
pub mod symmetric_eigen;

pub use eigenvalues::{block_eigenvalues, calc_eigenvalues, quasi_triangular_eigenvalues};
pub use givens::Givens;
pub use hessenberg::{hessenberg, tridiagonalize};
pub use householder::{apply_householder_left, apply_householder_right, make_householder};
pub use jacobi::jacobi_rotation;
pub use schur::{francis_qr, RealSchurDecomposition};
pub use spectrum::{condition_number, spectral_radius};
pub use symmetric_eigen::{tridiagonal_qr, SymmetricEigen};

use crate::traits::FloatScalar;

/// Every this many sweeps without a deflation, the Francis iteration swaps the
/// trailing-block shift for an ad-hoc one to break cycles (EISPACK `hqr`).
pub const EXCEPTIONAL_SHIFT_PERIOD: usize = 10;

/// Weight of the trailing sub-diagonal magnitudes added to the last diagonal
/// entry in the exceptional shift (EISPACK `hqr`).
pub const EXCEPTIONAL_SHIFT_SCALE: f64 = 0.75;

/// Exceptional shift product term: `x² - EXCEPTIONAL_SHIFT_PRODUCT · w²`, so the
/// pair is complex with imaginary part `sqrt(0.4375) · w` (EISPACK `hqr`).
pub const EXCEPTIONAL_SHIFT_PRODUCT: f64 = -0.4375;

/// A sub-diagonal entry above `COMPLEX_BLOCK_FACTOR * tolerance` times the sum
/// of its two diagonal neighbours marks a 2×2 block when eigenvalues are read
/// off a quasi-triangular matrix.
pub const COMPLEX_BLOCK_FACTOR: f64 = 10.0;

/// Sweep budget per matrix row used by the convenience methods.
pub const DEFAULT_ITERATIONS_PER_ROW: usize = 30;

/// Default relative deflation threshold: machine epsilon.
#[inline]
pub fn default_tolerance<T: FloatScalar>() -> T {
    T::epsilon()
}

/// Smallest norm still treated as non-zero: `sqrt(min_positive)`.
///
/// Squaring anything below this underflows.
#[inline]
pub fn smallest_tolerance<T: FloatScalar>() -> T {
    T::min_positive_value().sqrt()
}

/// Errors from the eigenvalue routines.
///
/// ```
/// use eigenkit::DynMatrix;
/// use eigenkit::linalg::{calc_eigenvalues, LinalgError};
///
/// let rect = DynMatrix::zeros(2, 3, 0.0_f64);
/// assert_eq!(
///     rect.eigenvalues_real().unwrap_err(),
///     LinalgError::NotSquare { rows: 2, cols: 3 },
/// );
///
/// let a = DynMatrix::from_rows(3, 3, &[0.0_f64, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
/// assert_eq!(
///     calc_eigenvalues(&a, 0, 1e-12).unwrap_err(),
///     LinalgError::ConvergenceFailure { solver: "calc_eigenvalues" },
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// The operation needs a square matrix.
    NotSquare { rows: usize, cols: usize },
    /// Iterative algorithm did not converge within the iteration budget.
    ConvergenceFailure { solver: &'static str },
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::NotSquare { rows, cols } => {
                write!(f, "expected a square matrix, got {}x{}", rows, cols)
            }
            LinalgError::ConvergenceFailure { solver } => {
                write!(f, "{} did not converge within the iteration budget", solver)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}

/// Outcome of an iterative sweep driver.
///
/// Returned by [`francis_qr`], [`tridiagonal_qr`] and the `factorize`
/// methods of both engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convergence {
    /// Fully deflated after `iterations` sweeps.
    Converged { iterations: usize },
    /// Budget exhausted; the leading `active_size` rows and columns are still
    /// unreduced.
    NotConverged { iterations: usize, active_size: usize },
}

impl Convergence {
    /// Whether the iteration deflated completely.
    #[inline]
    pub fn is_converged(&self) -> bool {
        matches!(self, Convergence::Converged { .. })
    }

    /// Sweeps performed.
    #[inline]
    pub fn iterations(&self) -> usize {
        match *self {
            Convergence::Converged { iterations } => iterations,
            Convergence::NotConverged { iterations, .. } => iterations,
        }
    }
}
