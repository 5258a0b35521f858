use std::f64::consts::PI;

use num_complex::Complex64;

use super::complex::{principal_sqrt, snap_to_real};
use super::prototype::butterworth_poles;
use crate::config::{Cutoff, FilterKind, FilterSpec};
use crate::error::{FilterError, Result};

/// Analog zero location. Butterworth designs only ever place zeros at the
/// origin or at infinity, so both are sentinels rather than numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalogZero {
    Origin,
    Infinity,
}

/// Frequency at which the digital cascade is normalized to the target gain
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GainReference {
    /// z = 1
    Dc,
    /// z = -1
    Nyquist,
    /// z = e^(j ω0 / fs), ω0 the prewarped analog center in rad/s
    Center { omega: f64 },
}

impl GainReference {
    pub fn z(&self, sample_rate: f64) -> Complex64 {
        match *self {
            GainReference::Dc => Complex64::new(1.0, 0.0),
            GainReference::Nyquist => Complex64::new(-1.0, 0.0),
            GainReference::Center { omega } => Complex64::from_polar(1.0, omega / sample_rate),
        }
    }
}

/// Analog poles and zeros of the requested response
#[derive(Debug, Clone, PartialEq)]
pub struct AnalogPrototype {
    pub poles: Vec<Complex64>,
    pub zeros: Vec<AnalogZero>,
    pub reference: GainReference,
}

/// Map a frequency in Hz to the analog frequency (rad/s) that the bilinear
/// transform at `sample_rate` sends back to it.
pub fn prewarp(freq_hz: f64, sample_rate: f64) -> f64 {
    2.0 * sample_rate * (PI * freq_hz / sample_rate).tan()
}

/// Scale normalized poles to cutoff `omega` (rad/s)
pub fn lowpass_poles(prototype: &[Complex64], omega: f64) -> Vec<Complex64> {
    prototype.iter().map(|&p| p * omega).collect()
}

/// Reflect normalized poles to a highpass with cutoff `omega` (rad/s)
pub fn highpass_poles(prototype: &[Complex64], omega: f64) -> Vec<Complex64> {
    prototype.iter().map(|&p| snap_to_real(omega / p)).collect()
}

/// Lowpass to bandpass: each prototype pole splits into the two roots of
/// `s^2 - bw p s + ω0^2`. Output order is `[s+(p0), s-(p0), s+(p1), ...]`.
pub fn bandpass_poles(prototype: &[Complex64], omega_low: f64, omega_high: f64) -> Vec<Complex64> {
    let bandwidth = omega_high - omega_low;
    let omega0_sq = omega_low * omega_high;

    let mut poles = Vec::with_capacity(prototype.len() * 2);
    for &p in prototype {
        let half = p * (bandwidth / 2.0);
        let root = principal_sqrt(half * half - omega0_sq);
        poles.push(snap_to_real(half + root));
        poles.push(snap_to_real(half - root));
    }
    poles
}

/// Analog poles, zeros and normalization point for `spec`
///
/// This is the only place that distinguishes between filter kinds; the
/// bilinear mapper and assembler downstream are kind-agnostic.
pub fn analog_prototype(spec: &FilterSpec) -> Result<AnalogPrototype> {
    let order = spec.order() as usize;
    let fs = spec.sample_rate();
    let prototype = butterworth_poles(spec.order())?;

    let analog = match (spec.kind(), spec.cutoff()) {
        (FilterKind::Lowpass, Cutoff::Single(f)) => AnalogPrototype {
            poles: lowpass_poles(&prototype, prewarp(f, fs)),
            zeros: vec![AnalogZero::Infinity; order],
            reference: GainReference::Dc,
        },
        (FilterKind::Highpass, Cutoff::Single(f)) => AnalogPrototype {
            poles: highpass_poles(&prototype, prewarp(f, fs)),
            zeros: vec![AnalogZero::Origin; order],
            reference: GainReference::Nyquist,
        },
        (FilterKind::Bandpass, Cutoff::Band { low, high }) => {
            let omega_low = prewarp(low, fs);
            let omega_high = prewarp(high, fs);
            let zeros = (0..2 * order)
                .map(|i| {
                    if i % 2 == 0 {
                        AnalogZero::Origin
                    } else {
                        AnalogZero::Infinity
                    }
                })
                .collect();
            AnalogPrototype {
                poles: bandpass_poles(&prototype, omega_low, omega_high),
                zeros,
                reference: GainReference::Center {
                    omega: (omega_low * omega_high).sqrt(),
                },
            }
        }
        (kind, cutoff) => {
            return Err(FilterError::InvalidSpec(format!(
                "{} filter cannot use cutoff {:?}",
                kind, cutoff
            )));
        }
    };

    log::trace!("Analog poles for {}: {:?}", spec, analog.poles);
    Ok(analog)
}
