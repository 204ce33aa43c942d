use alloc::vec::Vec;

use num_complex::Complex;

use crate::dynmatrix::DynMatrix;
use crate::linalg::eigenvalues::quasi_triangular_eigenvalues;
use crate::linalg::givens::Givens;
use crate::linalg::hessenberg::hessenberg;
use crate::linalg::householder::{apply_householder_left, apply_householder_right, make_householder};
use crate::linalg::{
    default_tolerance, Convergence, LinalgError, DEFAULT_ITERATIONS_PER_ROW,
    EXCEPTIONAL_SHIFT_PERIOD, EXCEPTIONAL_SHIFT_PRODUCT, EXCEPTIONAL_SHIFT_SCALE,
};
use crate::traits::{g, FloatScalar, MatrixMut, MatrixRef};

/// Whether `h[i, i-1]` is negligible next to its diagonal neighbours.
#[inline]
fn negligible<T: FloatScalar>(h: &impl MatrixRef<T>, i: usize, tolerance: T) -> bool {
    g(h, i, i - 1).abs() <= tolerance * (g(h, i - 1, i - 1).abs() + g(h, i, i).abs())
}

/// Sum and product `(s, t)` of the double shift for the block ending at row
/// `hi`, in units of `scale`.
///
/// The regular pair is the eigenvalue pair of the trailing 2×2 block. The
/// exceptional pair is `x ± i·sqrt(0.4375)·w` with
/// `w = |h[hi, hi-1]| + |h[hi-1, hi-2]|` and `x = h[hi, hi] + 0.75 w`, which
/// is always complex.
pub(crate) fn shift_pair<T: FloatScalar>(
    h: &impl MatrixRef<T>,
    hi: usize,
    exceptional: bool,
    scale: T,
) -> (T, T) {
    if exceptional {
        let w = g(h, hi, hi - 1).abs() / scale + g(h, hi - 1, hi - 2).abs() / scale;
        let x = g(h, hi, hi) / scale + T::lit(EXCEPTIONAL_SHIFT_SCALE) * w;
        (x + x, x * x - T::lit(EXCEPTIONAL_SHIFT_PRODUCT) * w * w)
    } else {
        let a11 = g(h, hi - 1, hi - 1) / scale;
        let a12 = g(h, hi - 1, hi) / scale;
        let a21 = g(h, hi, hi - 1) / scale;
        let a22 = g(h, hi, hi) / scale;
        (a11 + a22, a11 * a22 - a12 * a21)
    }
}

/// Francis double-shift QR iteration on an upper Hessenberg matrix.
///
/// Transforms `h` towards real Schur form (quasi-upper-triangular) in place,
/// accumulating the orthogonal similarity transform into `q` if given, so that
/// `A = Q H Qᵗ` keeps holding for the `Q` passed in. Real eigenvalues end up in
/// 1×1 diagonal blocks and complex conjugate pairs in 2×2 blocks.
///
/// A sub-diagonal entry is deflated (set to zero) once
/// `|h[i, i-1]| <= tolerance * (|h[i-1, i-1]| + |h[i, i]|)`. At most `max_iter`
/// sweeps are run; on exhaustion `h` and `q` hold the partially reduced, still
/// similar, state and the active size is reported.
///
/// Matrices smaller than 3×3 are returned untouched.
pub fn francis_qr<T: FloatScalar, M: MatrixMut<T>>(
    h: &mut M,
    mut q: Option<&mut M>,
    tolerance: T,
    max_iter: usize,
) -> Convergence {
    let n = h.nrows();
    assert_eq!(n, h.ncols(), "francis_qr requires a square matrix");
    if n < 3 {
        return Convergence::Converged { iterations: 0 };
    }

    let mut hi = n - 1;
    let mut iter = 0usize;
    let mut since_deflation = 0usize;

    loop {
        if hi <= 1 {
            #[cfg(feature = "log")]
            log::debug!("francis_qr: {}x{} converged after {} sweeps", n, n, iter);
            return Convergence::Converged { iterations: iter };
        }
        if negligible(h, hi, tolerance) {
            *h.get_mut(hi, hi - 1) = T::zero();
            hi -= 1;
            since_deflation = 0;
            continue;
        }
        if negligible(h, hi - 1, tolerance) {
            *h.get_mut(hi - 1, hi - 2) = T::zero();
            hi -= 2;
            since_deflation = 0;
            continue;
        }
        if iter == max_iter {
            #[cfg(feature = "log")]
            log::warn!(
                "francis_qr: budget of {} sweeps exhausted with {} rows active",
                max_iter,
                hi + 1
            );
            return Convergence::NotConverged {
                iterations: iter,
                active_size: hi + 1,
            };
        }
        iter += 1;
        since_deflation += 1;

        // Start of the trailing unreduced block; it spans at least 3 rows.
        let mut lo = hi - 2;
        while lo > 0 && !negligible(h, lo, tolerance) {
            lo -= 1;
        }
        if lo > 0 {
            *h.get_mut(lo, lo - 1) = T::zero();
        }

        // Shift and seed are homogeneous of degree two in these entries; they
        // are formed on entries divided by `scale`.
        let scale = [
            g(h, hi - 1, hi - 2),
            g(h, hi - 1, hi - 1),
            g(h, hi - 1, hi),
            g(h, hi, hi - 1),
            g(h, hi, hi),
            g(h, lo, lo),
            g(h, lo, lo + 1),
            g(h, lo + 1, lo),
            g(h, lo + 1, lo + 1),
            g(h, lo + 2, lo + 1),
        ]
        .iter()
        .fold(T::zero(), |m, e| m.max(e.abs()));
        let exceptional = since_deflation % EXCEPTIONAL_SHIFT_PERIOD == 0;
        let (s, t) = shift_pair(h, hi, exceptional, scale);

        // First column of (H - σ₁I)(H - σ₂I), σ₁ + σ₂ = s, σ₁σ₂ = t.
        let h00 = g(h, lo, lo) / scale;
        let h01 = g(h, lo, lo + 1) / scale;
        let h10 = g(h, lo + 1, lo) / scale;
        let h11 = g(h, lo + 1, lo + 1) / scale;
        let h21 = g(h, lo + 2, lo + 1) / scale;
        let mut x = h00 * h00 + h01 * h10 - s * h00 + t;
        let mut y = h10 * (h00 + h11 - s);
        let mut z = h10 * h21;

        for k in lo..=(hi - 2) {
            let mut v = [x, y, z];
            let beta = make_householder(&mut v);

            let col_start = if k > lo { k - 1 } else { k };
            apply_householder_left(&v, h, k, col_start..n);
            apply_householder_right(&v, h, k, 0..(k + 4).min(hi + 1));
            if let Some(q) = q.as_deref_mut() {
                apply_householder_right(&v, q, k, 0..n);
            }
            if k > lo {
                *h.get_mut(k, k - 1) = beta;
                *h.get_mut(k + 1, k - 1) = T::zero();
                *h.get_mut(k + 2, k - 1) = T::zero();
            }

            x = g(h, k + 1, k);
            y = g(h, k + 2, k);
            if k + 3 <= hi {
                z = g(h, k + 3, k);
            }
        }

        // The last bulge entry sits at (hi, hi-2); a rotation removes it.
        let rot = Givens::new(g(h, hi - 1, hi - 2), g(h, hi, hi - 2));
        rot.apply_left(h, hi - 1, hi, (hi - 2)..n);
        rot.apply_right_transpose(h, hi - 1, hi, 0..(hi + 1));
        if let Some(q) = q.as_deref_mut() {
            rot.apply_right_transpose(q, hi - 1, hi, 0..n);
        }
        *h.get_mut(hi, hi - 2) = T::zero();
    }
}

/// Real Schur decomposition of a square matrix.
///
/// Computes orthogonal Q and quasi-upper-triangular D such that `A = Q D Qᵗ`.
/// The diagonal of D consists of 1×1 blocks (real eigenvalues) and 2×2 blocks
/// (complex conjugate pairs).
///
/// The iteration never fails loudly: if the sweep budget runs out, `d()` and
/// `q()` hold the partially deflated state (still an orthogonal similarity
/// of the input) and [`status`](Self::status) says so.
///
/// # Example
///
/// ```
/// use eigenkit::DynMatrix;
/// use eigenkit::linalg::RealSchurDecomposition;
///
/// let a = DynMatrix::from_rows(3, 3, &[
///     1.0_f64, 2.0, 0.0,
///     -2.0, 1.0, 0.0,
///     0.0, 0.0, 3.0,
/// ]);
/// let schur = RealSchurDecomposition::new(&a, 50);
/// assert!(schur.is_converged());
///
/// let back = &(schur.q() * schur.d()) * &schur.q().transpose();
/// assert!(back.max_abs_diff(&a) < 1e-12);
///
/// // 1 ± 2i and 3
/// let mut ev = schur.eigenvalues();
/// ev.sort_by(|a, b| a.im.partial_cmp(&b.im).unwrap());
/// assert!((ev[0].re - 1.0).abs() < 1e-12 && (ev[0].im + 2.0).abs() < 1e-12);
/// assert!((ev[1].re - 3.0).abs() < 1e-12 && ev[1].im == 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct RealSchurDecomposition<T> {
    d: DynMatrix<T>,
    q: DynMatrix<T>,
    tolerance: T,
    status: Convergence,
}

impl<T: FloatScalar> RealSchurDecomposition<T> {
    /// An empty decomposition, to be filled by [`factorize`](Self::factorize).
    pub fn empty() -> Self {
        Self {
            d: DynMatrix::zeros(0, 0, T::zero()),
            q: DynMatrix::zeros(0, 0, T::zero()),
            tolerance: default_tolerance(),
            status: Convergence::Converged { iterations: 0 },
        }
    }

    /// Decompose `a` with at most `max_iter` Francis sweeps.
    ///
    /// Panics if `a` is not square.
    pub fn new(a: &DynMatrix<T>, max_iter: usize) -> Self {
        let mut s = Self::empty();
        s.factorize(a, max_iter);
        s
    }

    /// Builder-style deflation tolerance.
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the relative deflation tolerance used by later
    /// [`factorize`](Self::factorize) calls and by eigenvalue extraction.
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
            "Schur decomposition requires a square matrix, got {}x{}",
            a.nrows(),
            a.ncols()
        );
        let n = a.nrows();
        self.d = a.clone();
        self.q = DynMatrix::eye(n, T::zero());
        self.status = if n < 3 {
            Convergence::Converged { iterations: 0 }
        } else {
            hessenberg(&mut self.d, Some(&mut self.q));
            francis_qr(&mut self.d, Some(&mut self.q), self.tolerance, max_iter)
        };
        self.status
    }

    /// The quasi-upper-triangular factor D.
    #[inline]
    pub fn d(&self) -> &DynMatrix<T> {
        &self.d
    }

    /// The orthogonal factor Q, `A = Q D Qᵗ`.
    #[inline]
    pub fn q(&self) -> &DynMatrix<T> {
        &self.q
    }

    /// Outcome of the last [`factorize`](Self::factorize): sweeps used, and
    /// the still-active leading size if the budget ran out.
    #[inline]
    pub fn status(&self) -> Convergence {
        self.status
    }

    /// `true` when D is fully quasi-upper-triangular.
    #[inline]
    pub fn is_converged(&self) -> bool {
        self.status.is_converged()
    }

    /// Real parts of the eigenvalues, one per diagonal position.
    pub fn real_eigenvalues(&self) -> Vec<T> {
        self.eigenvalues().into_iter().map(|z| z.re).collect()
    }

    /// Eigenvalues read off the diagonal blocks of D, one per diagonal
    /// position. Conjugate pairs appear with the positive imaginary part
    /// first.
    pub fn eigenvalues(&self) -> Vec<Complex<T>> {
        quasi_triangular_eigenvalues(&self.d, self.tolerance)
    }
}

impl<T: FloatScalar> Default for RealSchurDecomposition<T> {
    fn default() -> Self {
        Self::empty()
    }
}

// ── Convenience methods on DynMatrix ────────────────────────────────

impl<T: FloatScalar> DynMatrix<T> {
    /// Real Schur decomposition with the default tolerance and a budget of
    /// `DEFAULT_ITERATIONS_PER_ROW` sweeps per row.
    ///
    /// ```
    /// use eigenkit::DynMatrix;
    /// let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 1.0]);
    /// let mut ev = a.real_schur().unwrap().real_eigenvalues();
    /// ev.sort_by(|a, b| a.partial_cmp(b).unwrap());
    /// assert_eq!(ev, vec![-1.0, 3.0]);
    /// ```
    pub fn real_schur(&self) -> Result<RealSchurDecomposition<T>, LinalgError> {
        if !self.is_square() {
            return Err(LinalgError::NotSquare {
                rows: self.nrows(),
                cols: self.ncols(),
            });
        }
        Ok(RealSchurDecomposition::new(
            self,
            DEFAULT_ITERATIONS_PER_ROW * self.nrows(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!(
            (a - b).abs() < tol,
            "{}: {} vs {} (diff {})",
            msg,
            a,
            b,
            (a - b).abs()
        );
    }

    fn verify_schur(a: &DynMatrix<f64>, schur: &RealSchurDecomposition<f64>) {
        let d = schur.d();
        let q = schur.q();
        let back = &(q * d) * &q.transpose();
        assert_near(back.max_abs_diff(a), 0.0, TOL, "‖A - QDQᵗ‖");
        assert!(q.is_orthogonal(TOL), "Q not orthogonal");
        if schur.is_converged() {
            assert!(d.is_quasi_triangular(0.0), "D not quasi-triangular:\n{}", d);
        } else {
            assert!(d.is_hessenberg(0.0));
        }
    }

    fn sorted_real(mut v: Vec<f64>) -> Vec<f64> {
        v.sort_by(|a, b| a.partial_cmp(b).unwrap());
        v
    }

    #[test]
    fn upper_triangular_is_fixed_point() {
        let a = DynMatrix::from_rows(3, 3, &[1.0, 2.0, 3.0, 0.0, 4.0, 5.0, 0.0, 0.0, 6.0]);
        let schur = RealSchurDecomposition::new(&a, 10);
        assert_eq!(schur.status(), Convergence::Converged { iterations: 0 });
        assert_eq!(schur.d(), &a);
        assert_eq!(schur.real_eigenvalues(), vec![1.0, 4.0, 6.0]);
    }

    #[test]
    fn general_4x4() {
        let a = DynMatrix::from_rows(
            4,
            4,
            &[1.0, 6.0, 5.0, 7.0, 1.0, 2.0, 6.0, 1.0, 2.0, 5.0, 3.0, 2.0, 8.0, 1.0, 3.0, 4.0],
        );
        let schur = RealSchurDecomposition::new(&a, 120);
        assert!(schur.is_converged());
        verify_schur(&a, &schur);
        let ev = sorted_real(schur.real_eigenvalues());
        let expected = [-5.1467112, -3.06044853, 4.28721786, 13.91994187];
        for (got, want) in ev.iter().zip(expected.iter()) {
            assert_near(*got, *want, 1e-6, "eigenvalue");
        }
        for z in schur.eigenvalues() {
            assert_eq!(z.im, 0.0);
        }
    }

    #[test]
    fn complex_pair_4x4() {
        let a = DynMatrix::from_rows(
            4,
            4,
            &[
                0.0, -0.5, 0.0, 0.0, //
                0.0, 0.25, -0.5, 0.0, //
                -0.5, -0.125, 0.25, 0.0, //
                0.25, 0.0625, -0.125, 0.0,
            ],
        );
        let schur = RealSchurDecomposition::new(&a, 120);
        assert!(schur.is_converged());
        verify_schur(&a, &schur);

        let mut ev = schur.eigenvalues();
        ev.sort_by(|a, b| (a.re, a.im).partial_cmp(&(b.re, b.im)).unwrap());
        let expected = [
            (-0.377438833123, 0.0),
            (0.0, 0.0),
            (0.438719416562, -0.372430883310),
            (0.438719416562, 0.372430883310),
        ];
        for (z, (re, im)) in ev.iter().zip(expected.iter()) {
            assert_near(z.re, *re, 1e-9, "re");
            assert_near(z.im, *im, 1e-9, "im");
        }
    }

    #[test]
    fn two_by_two_uses_closed_form() {
        let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 1.0]);
        let schur = RealSchurDecomposition::new(&a, 0);
        assert!(schur.is_converged());
        assert_eq!(schur.d(), &a);
        assert_eq!(schur.q(), &DynMatrix::eye(2, 0.0));
        assert_eq!(sorted_real(schur.real_eigenvalues()), vec![-1.0, 3.0]);
    }

    #[test]
    fn one_by_one_and_empty() {
        let a = DynMatrix::from_rows(1, 1, &[-7.5_f64]);
        let schur = RealSchurDecomposition::new(&a, 0);
        assert_eq!(schur.real_eigenvalues(), vec![-7.5]);

        let e = DynMatrix::<f64>::zeros(0, 0, 0.0);
        let schur = RealSchurDecomposition::new(&e, 0);
        assert!(schur.eigenvalues().is_empty());
    }

    #[test]
    fn budget_exhaustion_keeps_similarity() {
        let a = DynMatrix::from_fn(6, 6, |i, j| ((i * 5 + j * 3) % 7) as f64 - 2.5);
        let schur = RealSchurDecomposition::new(&a, 1);
        match schur.status() {
            Convergence::NotConverged {
                iterations,
                active_size,
            } => {
                assert_eq!(iterations, 1);
                assert!(active_size >= 3 && active_size <= 6);
            }
            other => panic!("expected NotConverged, got {:?}", other),
        }
        verify_schur(&a, &schur);
        assert_eq!(schur.real_eigenvalues().len(), 6);
    }

    #[test]
    fn exceptional_shift_is_complex_pair() {
        let h = DynMatrix::from_rows(
            4,
            4,
            &[
                0.0_f64, 0.0, 0.0, 1.0, //
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0,
            ],
        );
        // w = 2, x = 1.5: pair 1.5 ± i·sqrt(1.75)
        let (s, t) = shift_pair(&h, 3, true, 1.0);
        assert_eq!((s, t), (3.0, 4.0));
        assert!(s * s - 4.0 * t < 0.0);

        let (s, t) = shift_pair(&h, 3, true, 2.0);
        assert_eq!((s, t), (1.5, 1.0));

        assert_eq!(shift_pair(&h, 3, false, 1.0), (0.0, 0.0));
    }

    #[test]
    fn extreme_magnitudes() {
        let base = DynMatrix::from_fn(6, 6, |i, j| ((i * 5 + j * 3) % 7) as f64 - 2.5);
        let sort = |mut ev: Vec<Complex<f64>>| {
            ev.sort_by(|a, b| (a.re, a.im).partial_cmp(&(b.re, b.im)).unwrap());
            ev
        };
        let reference = RealSchurDecomposition::new(&base, 180);
        assert!(reference.is_converged());
        let expected = sort(reference.eigenvalues());

        for scale in [1e-300, 1e300] {
            let a = &base * scale;
            let schur = RealSchurDecomposition::new(&a, 180);
            assert!(schur.is_converged(), "scale {}", scale);
            let back = &(schur.q() * schur.d()) * &schur.q().transpose();
            assert_near(back.max_abs_diff(&a) / scale, 0.0, TOL, "‖A - QDQᵗ‖ / scale");
            assert!(schur.q().is_orthogonal(TOL), "Q not orthogonal at scale {}", scale);
            for (z, w) in sort(schur.eigenvalues()).iter().zip(expected.iter()) {
                assert_near(z.re / scale, w.re, 1e-9, "re");
                assert_near(z.im / scale, w.im, 1e-9, "im");
            }
        }
    }

    #[test]
    fn refactorize_is_bit_identical() {
        let a = DynMatrix::from_fn(5, 5, |i, j| ((i + 1) * (j + 2) % 7) as f64 - 3.0);
        let mut schur = RealSchurDecomposition::empty();
        schur.factorize(&a, 150);
        let d1 = schur.d().clone();
        let q1 = schur.q().clone();
        let other = DynMatrix::from_fn(3, 3, |i, j| (i + j) as f64);
        schur.factorize(&other, 150);
        schur.factorize(&a, 150);
        assert_eq!(schur.d(), &d1);
        assert_eq!(schur.q(), &q1);
    }

    #[test]
    fn explicit_tolerance() {
        let a = DynMatrix::from_fn(5, 5, |i, j| 1.0 / (i + j + 1) as f64 + if i == j { 1.0 } else { 0.0 });
        let schur = RealSchurDecomposition::empty().with_tolerance(1e-12);
        assert_eq!(schur.tolerance(), 1e-12);
        let mut schur = schur;
        schur.factorize(&a, 150);
        assert!(schur.is_converged());
        verify_schur(&a, &schur);
    }

    #[test]
    fn f32_support() {
        let a = DynMatrix::from_rows(3, 3, &[2.0_f32, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 4.0]);
        let schur = RealSchurDecomposition::new(&a, 90);
        assert!(schur.is_converged());
        let back = &(schur.q() * schur.d()) * &schur.q().transpose();
        assert!(back.max_abs_diff(&a) < 1e-5);
        let trace: f32 = schur.real_eigenvalues().iter().sum();
        assert!((trace - 9.0).abs() < 1e-4);
    }

    #[test]
    fn convenience_rejects_rectangular() {
        let a = DynMatrix::zeros(2, 3, 0.0_f64);
        assert_eq!(
            a.real_schur().unwrap_err(),
            LinalgError::NotSquare { rows: 2, cols: 3 }
        );
    }

    #[test]
    #[should_panic(expected = "square")]
    fn factorize_panics_on_rectangular() {
        let a = DynMatrix::zeros(3, 2, 0.0_f64);
        let _ = RealSchurDecomposition::new(&a, 10);
    }
}
