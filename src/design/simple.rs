//! Closed-form 2nd-order Butterworth sections.
//!
//! These skip the pole/zero machinery entirely and produce the same
//! coefficients as an order-2 [`super::design`] call. Handy on targets where
//! only a single biquad is ever needed, and as an independent cross-check of
//! the general designer.

use std::f64::consts::{PI, SQRT_2};

use crate::config::FilterSpec;
use crate::error::Result;
use crate::sos::{Section, SosCascade};

fn lowpass_section(cutoff_hz: f64, sample_rate: f64) -> Section {
    let ita = 1.0 / (PI * cutoff_hz / sample_rate).tan();
    let ita2 = ita * ita;
    let b0 = 1.0 / (1.0 + SQRT_2 * ita + ita2);
    let a1 = 2.0 * (1.0 - ita2) * b0;
    let a2 = (1.0 - SQRT_2 * ita + ita2) * b0;
    Section::new([b0, 2.0 * b0, b0], a1, a2)
}

fn highpass_section(cutoff_hz: f64, sample_rate: f64) -> Section {
    let ita = 1.0 / (PI * cutoff_hz / sample_rate).tan();
    let ita2 = ita * ita;
    let lp = lowpass_section(cutoff_hz, sample_rate);
    Section::new(
        [lp.b0() * ita2, -lp.b1() * ita2, lp.b2() * ita2],
        lp.a1(),
        lp.a2(),
    )
}

/// Single-section 2nd-order Butterworth lowpass
pub fn lowpass(cutoff_hz: f64, sample_rate: f64) -> Result<SosCascade> {
    FilterSpec::lowpass(2, cutoff_hz, sample_rate)?;
    SosCascade::new(vec![lowpass_section(cutoff_hz, sample_rate)])
}

/// Single-section 2nd-order Butterworth highpass
pub fn highpass(cutoff_hz: f64, sample_rate: f64) -> Result<SosCascade> {
    FilterSpec::highpass(2, cutoff_hz, sample_rate)?;
    SosCascade::new(vec![highpass_section(cutoff_hz, sample_rate)])
}

/// Highpass at `low_hz` followed by lowpass at `high_hz`
///
/// Not a Butterworth bandpass: the two skirts overlap, so the passband peak
/// sits below unity when the band is narrow.
pub fn bandpass(low_hz: f64, high_hz: f64, sample_rate: f64) -> Result<SosCascade> {
    FilterSpec::bandpass(2, low_hz, high_hz, sample_rate)?;
    SosCascade::new(vec![
        highpass_section(low_hz, sample_rate),
        lowpass_section(high_hz, sample_rate),
    ])
}
