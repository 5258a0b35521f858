use std::f64::consts::PI;

use num_complex::Complex64;

use super::complex::snap_to_real;
use crate::error::{FilterError, Result};

/// Normalized Butterworth poles (cutoff 1 rad/s)
///
/// Returns `order` poles evenly spaced on the left half of the unit circle,
/// `s_k = -sin(θ_k) + j cos(θ_k)` with `θ_k = π(2k + 1) / (2 order)`.
/// For odd orders the middle pole is exactly `-1 + 0j`.
///
/// # Errors
/// Returns `FilterError::InvalidSpec` if `order` is zero
pub fn butterworth_poles(order: u32) -> Result<Vec<Complex64>> {
    if order == 0 {
        return Err(FilterError::InvalidSpec(
            "Butterworth prototype needs order >= 1".to_string(),
        ));
    }

    let n = order as f64;
    let poles = (0..order)
        .map(|k| {
            let theta = PI * (2.0 * k as f64 + 1.0) / (2.0 * n);
            snap_to_real(Complex64::new(-theta.sin(), theta.cos()))
        })
        .collect();

    Ok(poles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_order_zero_rejected() {
        assert!(butterworth_poles(0).is_err());
    }

    #[test]
    fn test_first_order_pole() {
        let poles = butterworth_poles(1).unwrap();
        assert_eq!(poles, vec![Complex64::new(-1.0, 0.0)]);
    }

    #[test]
    fn test_second_order_poles() {
        let poles = butterworth_poles(2).unwrap();
        assert_eq!(poles.len(), 2);
        assert_abs_diff_eq!(poles[0].re, -FRAC_1_SQRT_2, epsilon = 1e-12);
        assert_abs_diff_eq!(poles[0].im, FRAC_1_SQRT_2, epsilon = 1e-12);
        assert_abs_diff_eq!(poles[1].re, -FRAC_1_SQRT_2, epsilon = 1e-12);
        assert_abs_diff_eq!(poles[1].im, -FRAC_1_SQRT_2, epsilon = 1e-12);
    }

    #[test]
    fn test_poles_on_left_unit_semicircle() {
        for order in 1..=10 {
            let poles = butterworth_poles(order).unwrap();
            assert_eq!(poles.len(), order as usize);
            for p in &poles {
                assert!(p.re < 0.0, "order {} pole {} not in left half plane", order, p);
                assert_abs_diff_eq!(p.norm(), 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_odd_order_has_exactly_one_real_pole() {
        let poles = butterworth_poles(5).unwrap();
        let real: Vec<_> = poles.iter().filter(|p| p.im == 0.0).collect();
        assert_eq!(real.len(), 1);
        assert_eq!(*real[0], Complex64::new(-1.0, 0.0));
    }

    #[test]
    fn test_poles_come_in_conjugate_pairs() {
        let poles = butterworth_poles(4).unwrap();
        for p in &poles {
            assert!(
                poles.iter().any(|q| (q - p.conj()).norm() < 1e-12),
                "pole {} has no conjugate",
                p
            );
        }
    }
}
