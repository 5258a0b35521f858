use num_complex::Complex64;

use super::complex::{conjugate_partner, is_real, monic_from_roots};
use crate::constants::MIN_REFERENCE_GAIN;
use crate::error::{FilterError, Result};
use crate::sos::Section;

/// Group digital poles and zeros into second-order sections
///
/// Poles and zeros are each sorted by ascending magnitude (stable, so ties
/// keep their original order). A complex pole takes its conjugate partner and
/// the next two zeros; a real pole becomes a first-order section with the
/// next single zero. The returned sections are not gain-normalized.
pub fn assemble(poles: &[Complex64], zeros: &[Complex64]) -> Vec<Section> {
    let mut poles = poles.to_vec();
    let mut zeros = zeros.to_vec();

    if zeros.len() < poles.len() {
        log::debug!(
            "Padding {} missing zeros at z = -1",
            poles.len() - zeros.len()
        );
        zeros.resize(poles.len(), Complex64::new(-1.0, 0.0));
    }

    poles.sort_by(|a, b| a.norm().total_cmp(&b.norm()));
    zeros.sort_by(|a, b| a.norm().total_cmp(&b.norm()));

    let mut sections = Vec::with_capacity(poles.len().div_ceil(2));
    let mut i = 0;
    while i < poles.len() {
        let p = poles[i];

        if !is_real(p) && i + 1 < poles.len() {
            if let Some(offset) = conjugate_partner(&poles[i + 1..], p) {
                poles.swap(i + 1, i + 1 + offset);
            }
            let b = monic_from_roots(zeros[i], Some(zeros[i + 1]));
            sections.push(Section::new(b, -2.0 * p.re, p.norm_sqr()));
            i += 2;
        } else {
            if !is_real(p) {
                log::warn!("Complex pole {} has no conjugate partner", p);
            }
            let b = monic_from_roots(zeros[i], None);
            sections.push(Section::new(b, -p.re, 0.0));
            i += 1;
        }
    }

    sections
}

/// Scale the first section's numerator so that `|H(reference)| == |target|`
///
/// # Errors
/// Returns `FilterError::DegenerateFilter` if the unnormalized cascade has
/// zero (or non-finite) magnitude at `reference`
pub fn normalize_gain(sections: &mut [Section], reference: Complex64, target: f64) -> Result<()> {
    let response = sections
        .iter()
        .fold(Complex64::new(1.0, 0.0), |acc, s| acc * s.response(reference));
    let magnitude = response.norm();

    if !magnitude.is_finite() || magnitude < MIN_REFERENCE_GAIN {
        return Err(FilterError::DegenerateFilter(format!(
            "response magnitude {} at reference point {}",
            magnitude, reference
        )));
    }

    let first = sections.first_mut().ok_or_else(|| {
        FilterError::DegenerateFilter("no sections to normalize".to_string())
    })?;
    first.scale_numerator(target / magnitude);
    Ok(())
}

/// Reject any pole on or outside the unit circle
pub fn check_stability(poles: &[Complex64]) -> Result<()> {
    match poles.iter().map(|p| p.norm()).find(|&m| !(m < 1.0)) {
        Some(magnitude) => Err(FilterError::UnstablePole { magnitude }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_conjugate_pair_forms_one_section() {
        let p = c(0.5, 0.3);
        let sections = assemble(&[p, p.conj()], &[c(-1.0, 0.0), c(-1.0, 0.0)]);
        assert_eq!(sections.len(), 1);
        let s = sections[0];
        assert_abs_diff_eq!(s.a1(), -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.a2(), 0.34, epsilon = 1e-12);
        assert_eq!([s.b0(), s.b1(), s.b2()], [1.0, 2.0, 1.0]);
    }

    #[test]
    fn test_real_pole_forms_first_order_section() {
        let sections = assemble(&[c(0.2, 0.0)], &[c(1.0, 0.0)]);
        assert_eq!(sections.len(), 1);
        let s = sections[0];
        assert!(s.is_first_order());
        assert_eq!(s.to_array(), [1.0, -1.0, 0.0, 1.0, -0.2, 0.0]);
    }

    #[test]
    fn test_sorted_by_magnitude() {
        let outer = c(0.0, 0.9);
        let inner = c(0.1, 0.2);
        let zeros = vec![c(-1.0, 0.0); 4];
        let sections = assemble(&[outer, outer.conj(), inner, inner.conj()], &zeros);
        assert_eq!(sections.len(), 2);
        assert_abs_diff_eq!(sections[0].a2(), inner.norm_sqr(), epsilon = 1e-12);
        assert_abs_diff_eq!(sections[1].a2(), outer.norm_sqr(), epsilon = 1e-12);
    }

    #[test]
    fn test_interleaved_conjugates_are_regrouped() {
        // Equal magnitudes: sorting alone could leave p1 next to p2.
        let p1 = Complex64::from_polar(0.8, 0.4);
        let p2 = Complex64::from_polar(0.8, 1.2);
        let zeros = vec![c(-1.0, 0.0); 4];
        let sections = assemble(&[p1, p2, p1.conj(), p2.conj()], &zeros);
        assert_eq!(sections.len(), 2);

        let mut a1: Vec<f64> = sections.iter().map(|s| s.a1()).collect();
        a1.sort_by(f64::total_cmp);
        let mut expected = vec![-2.0 * p1.re, -2.0 * p2.re];
        expected.sort_by(f64::total_cmp);
        assert_abs_diff_eq!(a1[0], expected[0], epsilon = 1e-12);
        assert_abs_diff_eq!(a1[1], expected[1], epsilon = 1e-12);
    }

    #[test]
    fn test_missing_zeros_padded_at_nyquist() {
        let sections = assemble(&[c(0.3, 0.0), c(0.5, 0.0)], &[]);
        assert_eq!(sections.len(), 2);
        for s in &sections {
            assert_eq!(s.b1(), 1.0);
        }
    }

    #[test]
    fn test_normalize_gain_at_dc() {
        let mut sections = assemble(&[c(0.5, 0.0)], &[c(-1.0, 0.0)]);
        normalize_gain(&mut sections, c(1.0, 0.0), 1.0).unwrap();
        let h = sections[0].response(c(1.0, 0.0));
        assert_abs_diff_eq!(h.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_gain_target() {
        let mut sections = assemble(&[c(0.5, 0.0)], &[c(-1.0, 0.0)]);
        normalize_gain(&mut sections, c(1.0, 0.0), 3.0).unwrap();
        let h = sections[0].response(c(1.0, 0.0));
        assert_abs_diff_eq!(h.norm(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_gain_degenerate() {
        // Zero at DC, normalized at DC
        let mut sections = assemble(&[c(0.5, 0.0)], &[c(1.0, 0.0)]);
        let err = normalize_gain(&mut sections, c(1.0, 0.0), 1.0).unwrap_err();
        assert!(matches!(err, FilterError::DegenerateFilter(_)));
    }

    #[test]
    fn test_check_stability() {
        assert!(check_stability(&[c(0.5, 0.5), c(0.99, 0.0)]).is_ok());
        assert!(matches!(
            check_stability(&[c(0.5, 0.0), c(1.0, 0.0)]),
            Err(FilterError::UnstablePole { .. })
        ));
        assert!(check_stability(&[c(f64::NAN, 0.0)]).is_err());
    }
}
