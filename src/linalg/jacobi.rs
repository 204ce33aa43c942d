use crate::traits::FloatScalar;

/// Rotation `(c, s)` that diagonalizes the symmetric block `[[a1, b], [b, a2]]`.
///
/// With `J = [[c, s], [-s, c]]`, `Jᵗ A J` is diagonal. Equivalently
/// `Givens::from_cs(c, s)` applied as `G A Gᵗ`. `b == 0` returns the identity.
///
/// ```
/// use eigenkit::linalg::jacobi_rotation;
///
/// let (c, s) = jacobi_rotation(2.0_f64, 1.0, 11.0);
/// assert!((c * c + s * s - 1.0).abs() < 1e-14);
/// ```
pub fn jacobi_rotation<T: FloatScalar>(a1: T, a2: T, b: T) -> (T, T) {
    if b == T::zero() {
        return (T::one(), T::zero());
    }
    let beta = (a2 - a1) / (T::two() * b);
    let t = beta.sign_or_one() / (beta.abs() + (beta * beta + T::one()).sqrt());
    let c = T::one() / (t * t + T::one()).sqrt();
    (c, c * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rotate(a1: f64, a2: f64, b: f64) -> [f64; 3] {
        let (c, s) = jacobi_rotation(a1, a2, b);
        // Jᵗ A J, J = [[c, s], [-s, c]]
        let d0 = c * c * a1 - 2.0 * c * s * b + s * s * a2;
        let d1 = s * s * a1 + 2.0 * c * s * b + c * c * a2;
        let off = c * s * (a1 - a2) + (c * c - s * s) * b;
        [d0, d1, off]
    }

    #[test]
    fn diagonalizes_block() {
        let [d0, d1, off] = rotate(2.0, 1.0, 11.0);
        assert!(off.abs() < 1e-13, "off = {}", off);
        // eigenvalues of [[2, 11], [11, 1]] are 1.5 ± sqrt(121.25)
        let r = 121.25_f64.sqrt();
        let (lo, hi) = if d0 < d1 { (d0, d1) } else { (d1, d0) };
        assert!((lo - (1.5 - r)).abs() < 1e-12);
        assert!((hi - (1.5 + r)).abs() < 1e-12);
    }

    #[test]
    fn equal_diagonal_uses_positive_sign() {
        let (c, s) = jacobi_rotation(3.0_f64, 3.0, 2.0);
        let h = core::f64::consts::FRAC_1_SQRT_2;
        assert!((c - h).abs() < 1e-15);
        assert!((s - h).abs() < 1e-15);
        let [_, _, off] = rotate(3.0, 3.0, 2.0);
        assert!(off.abs() < 1e-14);
    }

    #[test]
    fn zero_coupling_is_identity() {
        assert_eq!(jacobi_rotation(1.0_f64, 5.0, 0.0), (1.0, 0.0));
    }

    #[test]
    fn trace_is_preserved() {
        let [d0, d1, _] = rotate(-4.0, 7.5, 0.25);
        assert!((d0 + d1 - 3.5).abs() < 1e-13);
    }
}
