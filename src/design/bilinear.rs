use num_complex::Complex64;

use super::complex::snap_to_real;
use super::transform::{AnalogPrototype, AnalogZero};

/// Digital poles and zeros, always of equal length
#[derive(Debug, Clone, PartialEq)]
pub struct DigitalPrototype {
    pub poles: Vec<Complex64>,
    pub zeros: Vec<Complex64>,
}

/// Bilinear map `z = (2 fs + s) / (2 fs - s)`
///
/// Uses the same explicit-`fs` convention as [`super::transform::prewarp`],
/// so a prewarped analog frequency lands exactly back on its digital one.
pub fn bilinear(s: Complex64, sample_rate: f64) -> Complex64 {
    let k = 2.0 * sample_rate;
    snap_to_real((k + s) / (k - s))
}

/// Where a sentinel analog zero lands on the unit circle
pub fn map_zero(zero: AnalogZero) -> Complex64 {
    match zero {
        AnalogZero::Origin => Complex64::new(1.0, 0.0),
        AnalogZero::Infinity => Complex64::new(-1.0, 0.0),
    }
}

/// Map every analog pole and zero of `analog` into the z-plane
pub fn to_digital(analog: &AnalogPrototype, sample_rate: f64) -> DigitalPrototype {
    let poles: Vec<Complex64> = analog
        .poles
        .iter()
        .map(|&s| bilinear(s, sample_rate))
        .collect();
    let zeros: Vec<Complex64> = analog.zeros.iter().map(|&z| map_zero(z)).collect();
    debug_assert_eq!(poles.len(), zeros.len());

    DigitalPrototype { poles, zeros }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_origin_maps_to_dc() {
        let z = bilinear(Complex64::new(0.0, 0.0), 100.0);
        assert_eq!(z, Complex64::new(1.0, 0.0));
        assert_eq!(map_zero(AnalogZero::Origin), z);
    }

    #[test]
    fn test_infinity_maps_to_nyquist() {
        assert_eq!(map_zero(AnalogZero::Infinity), Complex64::new(-1.0, 0.0));
        // A very large real s approaches -1
        let z = bilinear(Complex64::new(-1e12, 0.0), 100.0);
        assert_abs_diff_eq!(z.re, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_left_half_plane_maps_inside_unit_circle() {
        for &s in &[
            Complex64::new(-1.0, 0.0),
            Complex64::new(-10.0, 50.0),
            Complex64::new(-0.01, -300.0),
        ] {
            assert!(bilinear(s, 100.0).norm() < 1.0, "{} escaped", s);
        }
    }

    #[test]
    fn test_imaginary_axis_maps_to_prewarped_frequency() {
        let fs = 100.0;
        let f = 10.0;
        let omega = 2.0 * fs * (PI * f / fs).tan();
        let z = bilinear(Complex64::new(0.0, omega), fs);
        assert_abs_diff_eq!(z.norm(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(z.arg(), 2.0 * PI * f / fs, epsilon = 1e-12);
    }

    #[test]
    fn test_conjugate_poles_stay_conjugate() {
        let s = Complex64::new(-20.0, 35.0);
        let z1 = bilinear(s, 100.0);
        let z2 = bilinear(s.conj(), 100.0);
        assert_eq!(z1, z2.conj());
    }
}
