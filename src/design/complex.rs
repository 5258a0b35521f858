//! Small complex-number helpers used by the designer.
//!
//! Everything else (multiply, divide, `norm`, principal-branch `sqrt`) comes
//! straight from `num_complex`.

use num_complex::Complex64;

use crate::constants::REAL_AXIS_EPSILON;

/// True if `z` lies on the real axis up to trigonometric round-off
pub fn is_real(z: Complex64) -> bool {
    z.im.abs() < REAL_AXIS_EPSILON
}

/// Zero out a negligible imaginary part
pub fn snap_to_real(z: Complex64) -> Complex64 {
    if is_real(z) {
        Complex64::new(z.re, 0.0)
    } else {
        z
    }
}

/// Principal square root. The branch cut is the negative real axis, and the
/// sign of the result's imaginary part follows the sign of `z.im` (including
/// signed zero), so `sqrt(-4 - 0i) == -2i`.
pub fn principal_sqrt(z: Complex64) -> Complex64 {
    z.sqrt()
}

/// Real coefficients `[1, c1, c2]` of `(x - r1)(x - r2)`, or `[1, -r1, 0]`
/// when only one root is given. Roots must be real or a conjugate pair.
pub fn monic_from_roots(r1: Complex64, r2: Option<Complex64>) -> [f64; 3] {
    match r2 {
        Some(r2) => [1.0, -(r1 + r2).re, (r1 * r2).re],
        None => [1.0, -r1.re, 0.0],
    }
}

/// Index in `candidates` of the value closest to `conj(z)`
pub fn conjugate_partner(candidates: &[Complex64], z: Complex64) -> Option<usize> {
    let target = z.conj();
    candidates
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (**a - target).norm().total_cmp(&(**b - target).norm()))
        .map(|(i, _)| i)
}

/// Evaluate a real polynomial (highest power first) at `z` using Horner's rule
pub fn poly_eval(coefficients: &[f64], z: Complex64) -> Complex64 {
    coefficients
        .iter()
        .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * z + c)
}
