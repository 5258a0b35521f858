//! Conversion between float SOS coefficients and the quantized
//! Direct-Form-I layout used by the fixed-point runtime.
//!
//! | layout            | per-section order                 | feedback sign |
//! |-------------------|-----------------------------------|---------------|
//! | float (`sos`)     | `[b0, b1, b2, a0, a1, a2]`        | `+a1, +a2`    |
//! | quantized (DF-I)  | `[b0, 0, b1, b2, -a1, -a2]`       | `-a1, -a2`    |
//!
//! The quantized layout is the one CMSIS-DSP style `q15` biquad kernels read:
//! the feedback terms are pre-negated so the kernel only ever accumulates.

use crate::constants::COEFFICIENTS_PER_SECTION;
use crate::error::{FilterError, Result};
use crate::sos::{Section, SosCascade};

/// Integer coefficients of a whole cascade, with the scale they were made at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedCascade {
    sections: Vec<[i16; 6]>,
    scale: i32,
}

impl QuantizedCascade {
    /// Rebuild from the flat `i16` layout, e.g. coefficients stored on a device
    pub fn from_flat(coefficients: &[i16], scale: i32) -> Result<Self> {
        check_scale(scale)?;
        if coefficients.is_empty() || coefficients.len() % COEFFICIENTS_PER_SECTION != 0 {
            return Err(FilterError::InvalidCoefficients(format!(
                "expected a non-zero multiple of {} coefficients, got {}",
                COEFFICIENTS_PER_SECTION,
                coefficients.len()
            )));
        }

        let mut sections = Vec::with_capacity(coefficients.len() / COEFFICIENTS_PER_SECTION);
        for c in coefficients.chunks_exact(COEFFICIENTS_PER_SECTION) {
            if c[1] != 0 {
                return Err(FilterError::InvalidCoefficients(format!(
                    "second slot of a Direct-Form-I section must be 0, got {}",
                    c[1]
                )));
            }
            sections.push([c[0], c[1], c[2], c[3], c[4], c[5]]);
        }
        Ok(Self { sections, scale })
    }

    pub fn sections(&self) -> &[[i16; 6]] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn scale(&self) -> i32 {
        self.scale
    }

    /// Right shift that brings a product of a coefficient and a sample back
    /// to sample width: the bit length of `scale` (13 for `2^13 - 1`).
    pub fn shift(&self) -> u32 {
        i32::BITS - self.scale.leading_zeros()
    }

    pub fn to_flat(&self) -> Vec<i16> {
        self.sections.iter().flatten().copied().collect()
    }

    /// Approximate float cascade. Each coefficient is within `0.5 / scale`
    /// of the one that was quantized.
    pub fn dequantize(&self) -> Result<SosCascade> {
        let s = self.scale as f64;
        let sections = self
            .sections
            .iter()
            .map(|c| {
                Section::new(
                    [c[0] as f64 / s, c[2] as f64 / s, c[3] as f64 / s],
                    -(c[4] as f64) / s,
                    -(c[5] as f64) / s,
                )
            })
            .collect();
        SosCascade::new(sections)
    }
}

fn check_scale(scale: i32) -> Result<()> {
    if scale < 1 || scale > i16::MAX as i32 {
        return Err(FilterError::CoefficientOverflow {
            value: scale as f64,
            scale,
        });
    }
    Ok(())
}

fn quantize_value(value: f64, scale: i32) -> Result<i16> {
    let scaled = (value * scale as f64).round();
    if !scaled.is_finite() || scaled < i16::MIN as f64 || scaled > i16::MAX as f64 {
        return Err(FilterError::CoefficientOverflow { value, scale });
    }
    Ok(scaled as i16)
}

/// Quantize a float cascade into the Direct-Form-I `i16` layout
///
/// # Errors
/// - `FilterError::CoefficientOverflow` if `scale` is outside `1..=i16::MAX`
///   or any scaled coefficient does not fit in `i16`
/// - `FilterError::CoefficientUnderflow` if a non-zero numerator rounds to all
///   zeros, e.g. the gain-carrying section of a very low-cutoff lowpass
///
/// # Example
/// ```
/// use iircore::codec::quantize;
/// use iircore::SosCascade;
///
/// let cascade = SosCascade::from_flat(&[0.25, 0.5, 0.25, 1.0, -0.5, 0.25]).unwrap();
/// let q = quantize(&cascade, 8191).unwrap();
/// assert_eq!(q.to_flat(), vec![2048, 0, 4096, 2048, 4096, -2048]);
/// ```
pub fn quantize(cascade: &SosCascade, scale: i32) -> Result<QuantizedCascade> {
    check_scale(scale)?;

    let sections = cascade
        .sections()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let q = [
                quantize_value(s.b0(), scale)?,
                0,
                quantize_value(s.b1(), scale)?,
                quantize_value(s.b2(), scale)?,
                quantize_value(-s.a1(), scale)?,
                quantize_value(-s.a2(), scale)?,
            ];
            // A zeroed numerator silences the whole cascade
            let float_zero = s.b0() == 0.0 && s.b1() == 0.0 && s.b2() == 0.0;
            if !float_zero && q[0] == 0 && q[2] == 0 && q[3] == 0 {
                return Err(FilterError::CoefficientUnderflow { section: i, scale });
            }
            Ok(q)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuantizedCascade { sections, scale })
}

/// Quantize coefficients given in the flat float wire format
///
/// # Errors
/// Returns `FilterError::InvalidCoefficients` if the flat input is malformed
/// (wrong length, `a0 != 1`), otherwise as [`quantize`]
pub fn quantize_flat(coefficients: &[f64], scale: i32) -> Result<QuantizedCascade> {
    quantize(&SosCascade::from_flat(coefficients)?, scale)
}
