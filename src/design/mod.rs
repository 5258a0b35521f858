//! Butterworth filter design as cascaded second-order sections.
//!
//! The pipeline is split into pure stages that can be tested on their own:
//! prototype poles → frequency transform (with prewarping) → bilinear map →
//! pole/zero pairing → gain normalization.

pub mod assembler;
pub mod bilinear;
pub mod complex;
pub mod prototype;
pub mod simple;
pub mod transform;

pub use assembler::{assemble, check_stability, normalize_gain};
pub use bilinear::{DigitalPrototype, bilinear, to_digital};
pub use prototype::butterworth_poles;
pub use transform::{AnalogPrototype, AnalogZero, GainReference, analog_prototype, prewarp};

use crate::config::FilterSpec;
use crate::error::{FilterError, Result};
use crate::sos::SosCascade;

/// Design a unity-gain Butterworth cascade
///
/// Gain is normalized at DC for lowpass, at Nyquist for highpass, and at the
/// band center for bandpass.
///
/// # Example
/// ```
/// use iircore::config::FilterSpec;
/// use iircore::design::design;
///
/// let spec = FilterSpec::lowpass(2, 10.0, 100.0).unwrap();
/// let cascade = design(&spec).unwrap();
/// assert_eq!(cascade.len(), 1);
/// assert!((cascade.magnitude_at(0.0, 100.0) - 1.0).abs() < 1e-9);
/// ```
pub fn design(spec: &FilterSpec) -> Result<SosCascade> {
    design_with_gain(spec, 1.0)
}

/// Design a Butterworth cascade with `|H| == |gain|` at the reference point
///
/// # Errors
/// - `FilterError::InvalidSpec` if `gain` is zero or not finite
/// - `FilterError::UnstablePole` if a digital pole lands on or outside the
///   unit circle
/// - `FilterError::DegenerateFilter` if the reference-point response vanishes
pub fn design_with_gain(spec: &FilterSpec, gain: f64) -> Result<SosCascade> {
    if !gain.is_finite() || gain == 0.0 {
        return Err(FilterError::InvalidSpec(format!(
            "target gain must be finite and non-zero, got {}",
            gain
        )));
    }

    let fs = spec.sample_rate();
    let analog = analog_prototype(spec)?;
    let digital = to_digital(&analog, fs);
    check_stability(&digital.poles)?;

    let mut sections = assemble(&digital.poles, &digital.zeros);
    normalize_gain(&mut sections, analog.reference.z(fs), gain)?;

    let cascade = SosCascade::new(sections)?;
    debug_assert!(cascade.is_stable());
    log::debug!(
        "Designed {}: {} section(s), gain {}",
        spec,
        cascade.len(),
        gain
    );
    Ok(cascade)
}
