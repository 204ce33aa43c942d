use alloc::vec;
use alloc::vec::Vec;

use num_complex::Complex;

use crate::dynmatrix::DynMatrix;
use crate::linalg::hessenberg::hessenberg;
use crate::linalg::schur::francis_qr;
use crate::linalg::{default_tolerance, LinalgError, COMPLEX_BLOCK_FACTOR, DEFAULT_ITERATIONS_PER_ROW};
use crate::traits::{g, FloatScalar, MatrixRef};

/// Eigenvalues of the 2×2 block `[[a, b], [c, d]]`.
///
/// Real pairs come back larger first; complex pairs with the positive
/// imaginary part first.
///
/// ```
/// use eigenkit::linalg::block_eigenvalues;
///
/// let (l1, l2) = block_eigenvalues(1.0_f64, 2.0, 2.0, 1.0);
/// assert_eq!((l1.re, l2.re), (3.0, -1.0));
///
/// let (z1, z2) = block_eigenvalues(0.0_f64, -1.0, 1.0, 0.0);
/// assert_eq!((z1.im, z2.im), (1.0, -1.0));
/// ```
pub fn block_eigenvalues<T: FloatScalar>(a: T, b: T, c: T, d: T) -> (Complex<T>, Complex<T>) {
    // Solved on the block divided by its largest entry so the discriminant
    // neither overflows nor underflows.
    let p = a.abs().max(b.abs()).max(c.abs()).max(d.abs());
    if p == T::zero() {
        let zero = Complex::new(T::zero(), T::zero());
        return (zero, zero);
    }
    let (a, b, c, d) = (a / p, b / p, c / p, d / p);
    let trace = a + d;
    let det = a * d - b * c;
    let disc = trace * trace - T::lit(4.0) * det;
    let half = trace * T::half();
    if disc >= T::zero() {
        let r = disc.sqrt() * T::half();
        (
            Complex::new((half + r) * p, T::zero()),
            Complex::new((half - r) * p, T::zero()),
        )
    } else {
        let im = (-disc).sqrt() * T::half();
        (Complex::new(half * p, im * p), Complex::new(half * p, -im * p))
    }
}

/// Eigenvalues of a quasi-upper-triangular matrix, one per diagonal position.
///
/// A sub-diagonal entry `d[i+1, i]` with magnitude above
/// `COMPLEX_BLOCK_FACTOR * tolerance * (|d[i, i]| + |d[i+1, i+1]|)` marks a
/// 2×2 block, solved by [`block_eigenvalues`]; every other position
/// contributes its diagonal entry. The test is relative, like deflation, so
/// it reads the same block structure at any scale.
pub fn quasi_triangular_eigenvalues<T: FloatScalar>(
    d: &impl MatrixRef<T>,
    tolerance: T,
) -> Vec<Complex<T>> {
    let n = d.nrows();
    let factor = T::lit(COMPLEX_BLOCK_FACTOR) * tolerance;
    let mut out = Vec::with_capacity(n);
    let mut i = 0;
    while i < n {
        let is_block = i + 1 < n
            && g(d, i + 1, i).abs() > factor * (g(d, i, i).abs() + g(d, i + 1, i + 1).abs());
        if is_block {
            let (l1, l2) = block_eigenvalues(
                g(d, i, i),
                g(d, i, i + 1),
                g(d, i + 1, i),
                g(d, i + 1, i + 1),
            );
            out.push(l1);
            out.push(l2);
            i += 2;
        } else {
            out.push(Complex::new(g(d, i, i), T::zero()));
            i += 1;
        }
    }
    out
}

/// Real parts of the eigenvalues of a square matrix.
///
/// Lightweight path without the orthogonal factor: reduces a copy to
/// Hessenberg form and runs the Francis iteration on it. Complex conjugate
/// pairs contribute their real part twice. Sizes 1 and 2 are solved in closed
/// form.
///
/// Fails with [`LinalgError::ConvergenceFailure`] if `max_iter` sweeps do not
/// deflate the matrix completely.
///
/// ```
/// use eigenkit::DynMatrix;
/// use eigenkit::linalg::calc_eigenvalues;
///
/// // roots of x³ - 6x² + 11x - 6
/// let c = DynMatrix::companion(&[-6.0_f64, 11.0, -6.0, 1.0]);
/// let mut roots = calc_eigenvalues(&c, 60, 1e-14).unwrap();
/// roots.sort_by(|a, b| a.partial_cmp(b).unwrap());
/// for (r, want) in roots.iter().zip([1.0, 2.0, 3.0]) {
///     assert!((r - want).abs() < 1e-10);
/// }
/// ```
pub fn calc_eigenvalues<T: FloatScalar>(
    a: &DynMatrix<T>,
    max_iter: usize,
    tolerance: T,
) -> Result<Vec<T>, LinalgError> {
    if !a.is_square() {
        return Err(LinalgError::NotSquare {
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    match a.nrows() {
        0 => return Ok(Vec::new()),
        1 => return Ok(vec![a[(0, 0)]]),
        2 => {
            let (l1, l2) = block_eigenvalues(a[(0, 0)], a[(0, 1)], a[(1, 0)], a[(1, 1)]);
            return Ok(vec![l1.re, l2.re]);
        }
        _ => {}
    }

    let mut h = a.clone();
    hessenberg(&mut h, None);
    let status = francis_qr(&mut h, None, tolerance, max_iter);
    if !status.is_converged() {
        return Err(LinalgError::ConvergenceFailure {
            solver: "calc_eigenvalues",
        });
    }
    Ok(quasi_triangular_eigenvalues(&h, tolerance)
        .into_iter()
        .map(|z| z.re)
        .collect())
}

impl<T: FloatScalar> DynMatrix<T> {
    /// Real parts of the eigenvalues via [`calc_eigenvalues`] with the
    /// default tolerance and `DEFAULT_ITERATIONS_PER_ROW` sweeps per row.
    pub fn eigenvalues_real(&self) -> Result<Vec<T>, LinalgError> {
        calc_eigenvalues(
            self,
            DEFAULT_ITERATIONS_PER_ROW * self.nrows(),
            default_tolerance(),
        )
    }
}
