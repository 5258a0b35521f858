//! Second-order sections and cascades of them.
//!
//! A [`Section`] is stored in the conventional six-coefficient layout
//! `[b0, b1, b2, a0, a1, a2]` with `a0 == 1.0`, and transfer function
//!
//! ```text
//!         b0 + b1 z^-1 + b2 z^-2
//! H(z) = ------------------------
//!          1 + a1 z^-1 + a2 z^-2
//! ```
//!
//! This matches scipy's `sosfilt` convention. The Direct-Form-I layout used by
//! the fixed-point runtime flips the sign of `a1, a2`; that conversion lives in
//! [`crate::codec`] and nowhere else.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::constants::COEFFICIENTS_PER_SECTION;
use crate::design::complex::poly_eval;
use crate::error::{FilterError, Result};

/// One biquad stage, normalized so that `a0 == 1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

impl Section {
    /// Build a section from numerator `b` and the two feedback coefficients.
    /// A first-order section has `b[2] == a2 == 0`.
    pub fn new(b: [f64; 3], a1: f64, a2: f64) -> Self {
        Self {
            b0: b[0],
            b1: b[1],
            b2: b[2],
            a1,
            a2,
        }
    }

    /// Parse a `[b0, b1, b2, a0, a1, a2]` record. `a0` must be exactly 1.0.
    pub fn from_array(c: [f64; 6]) -> Result<Self> {
        if c.iter().any(|v| !v.is_finite()) {
            return Err(FilterError::InvalidCoefficients(format!(
                "non-finite coefficient in {:?}",
                c
            )));
        }
        if c[3] != 1.0 {
            return Err(FilterError::InvalidCoefficients(format!(
                "a0 must be 1.0, got {}",
                c[3]
            )));
        }
        Ok(Self::new([c[0], c[1], c[2]], c[4], c[5]))
    }

    pub fn to_array(&self) -> [f64; 6] {
        [self.b0, self.b1, self.b2, 1.0, self.a1, self.a2]
    }

    pub fn b0(&self) -> f64 {
        self.b0
    }

    pub fn b1(&self) -> f64 {
        self.b1
    }

    pub fn b2(&self) -> f64 {
        self.b2
    }

    pub fn a0(&self) -> f64 {
        1.0
    }

    pub fn a1(&self) -> f64 {
        self.a1
    }

    pub fn a2(&self) -> f64 {
        self.a2
    }

    pub(crate) fn scale_numerator(&mut self, factor: f64) {
        self.b0 *= factor;
        self.b1 *= factor;
        self.b2 *= factor;
    }

    pub fn is_first_order(&self) -> bool {
        self.a2 == 0.0 && self.b2 == 0.0
    }

    /// Evaluate the section's transfer function at `z`
    pub fn response(&self, z: Complex64) -> Complex64 {
        let zi = z.inv();
        let num = poly_eval(&[self.b2, self.b1, self.b0], zi);
        let den = poly_eval(&[self.a2, self.a1, 1.0], zi);
        num / den
    }

    /// Roots of `z^2 + a1 z + a2`. First-order sections report one pole.
    pub fn poles(&self) -> Vec<Complex64> {
        if self.a2 == 0.0 {
            return vec![Complex64::new(-self.a1, 0.0)];
        }
        let disc = Complex64::new(self.a1 * self.a1 - 4.0 * self.a2, 0.0).sqrt();
        vec![(-self.a1 + disc) / 2.0, (-self.a1 - disc) / 2.0]
    }
}

/// Ordered, non-empty list of sections
///
/// The order is the assembler's pairing order; it does not change the ideal
/// transfer function but it does change rounding, so it is preserved as-is.
/// Immutable once built; wrap in `Arc` to share between streams.
#[derive(Debug, Clone, PartialEq)]
pub struct SosCascade {
    sections: Vec<Section>,
}

impl SosCascade {
    pub fn new(sections: Vec<Section>) -> Result<Self> {
        if sections.is_empty() {
            return Err(FilterError::InvalidCoefficients(
                "cascade needs at least one section".to_string(),
            ));
        }
        Ok(Self { sections })
    }

    /// Parse the flat wire format: 6 coefficients per section, concatenated
    ///
    /// # Example
    /// ```
    /// use iircore::SosCascade;
    ///
    /// let flat = [0.2064, 0.4128, 0.2064, 1.0, -0.3701, 0.1961];
    /// let cascade = SosCascade::from_flat(&flat).unwrap();
    /// assert_eq!(cascade.len(), 1);
    /// assert!(SosCascade::from_flat(&flat[..5]).is_err());
    /// ```
    pub fn from_flat(coefficients: &[f64]) -> Result<Self> {
        if coefficients.is_empty() || coefficients.len() % COEFFICIENTS_PER_SECTION != 0 {
            return Err(FilterError::InvalidCoefficients(format!(
                "expected a non-zero multiple of {} coefficients, got {}",
                COEFFICIENTS_PER_SECTION,
                coefficients.len()
            )));
        }
        let sections = coefficients
            .chunks_exact(COEFFICIENTS_PER_SECTION)
            .map(|c| Section::from_array([c[0], c[1], c[2], c[3], c[4], c[5]]))
            .collect::<Result<Vec<_>>>()?;
        Self::new(sections)
    }

    pub fn to_flat(&self) -> Vec<f64> {
        self.sections.iter().flat_map(|s| s.to_array()).collect()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Product of all section responses at `z`
    pub fn response(&self, z: Complex64) -> Complex64 {
        self.sections
            .iter()
            .fold(Complex64::new(1.0, 0.0), |acc, s| acc * s.response(z))
    }

    /// Magnitude response at `freq_hz` for a cascade running at `sample_rate`
    pub fn magnitude_at(&self, freq_hz: f64, sample_rate: f64) -> f64 {
        let omega = 2.0 * PI * freq_hz / sample_rate;
        self.response(Complex64::from_polar(1.0, omega)).norm()
    }

    /// Largest pole magnitude over all sections
    pub fn max_pole_magnitude(&self) -> f64 {
        self.sections
            .iter()
            .flat_map(|s| s.poles())
            .map(|p| p.norm())
            .fold(0.0, f64::max)
    }

    pub fn is_stable(&self) -> bool {
        self.max_pole_magnitude() < 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // Order-2 lowpass followed by an order-2 highpass, as produced by scipy.
    const REFERENCE_FLAT: [f64; 12] = [
        0.2064104175118759,
        0.4128208350237518,
        0.2064104175118759,
        1.0,
        -0.37007910158090057,
        0.19608813997724178,
        1.0,
        -2.0,
        1.0,
        1.0,
        -1.999111423794296,
        0.9991118187443988,
    ];

    #[test]
    fn test_flat_format_roundtrip_keeps_a0() {
        let cascade = SosCascade::from_flat(&REFERENCE_FLAT).unwrap();
        assert_eq!(cascade.len(), 2);
        assert_eq!(cascade.to_flat(), REFERENCE_FLAT.to_vec());
        assert_eq!(cascade.to_flat()[3], 1.0);
        assert_eq!(cascade.to_flat()[9], 1.0);
    }

    #[test]
    fn test_from_flat_rejects_bad_length() {
        assert!(SosCascade::from_flat(&[]).is_err());
        assert!(SosCascade::from_flat(&REFERENCE_FLAT[..7]).is_err());
    }

    #[test]
    fn test_from_flat_rejects_unnormalized_a0() {
        let mut flat = REFERENCE_FLAT;
        flat[3] = 2.0;
        let err = SosCascade::from_flat(&flat).unwrap_err();
        assert!(matches!(err, FilterError::InvalidCoefficients(_)));
    }

    #[test]
    fn test_from_flat_rejects_nan() {
        let mut flat = REFERENCE_FLAT;
        flat[1] = f64::NAN;
        assert!(SosCascade::from_flat(&flat).is_err());
    }

    #[test]
    fn test_section_response_at_dc() {
        let section = Section::new([0.25, 0.5, 0.25], 0.0, 0.0);
        let h = section.response(Complex64::new(1.0, 0.0));
        assert_abs_diff_eq!(h.re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(h.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_section_poles() {
        // (z - 0.5)(z - 0.25) = z^2 - 0.75 z + 0.125
        let section = Section::new([1.0, 0.0, 0.0], -0.75, 0.125);
        let mut mags: Vec<f64> = section.poles().iter().map(|p| p.norm()).collect();
        mags.sort_by(f64::total_cmp);
        assert_abs_diff_eq!(mags[0], 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(mags[1], 0.5, epsilon = 1e-12);

        let first_order = Section::new([1.0, 1.0, 0.0], -0.3, 0.0);
        assert!(first_order.is_first_order());
        assert_eq!(first_order.poles(), vec![Complex64::new(0.3, 0.0)]);
    }

    #[test]
    fn test_reference_cascade_is_stable() {
        let cascade = SosCascade::from_flat(&REFERENCE_FLAT).unwrap();
        assert!(cascade.is_stable());
        // Highpass section blocks DC entirely
        assert_abs_diff_eq!(cascade.magnitude_at(0.0, 100.0), 0.0, epsilon = 1e-9);
    }
}
