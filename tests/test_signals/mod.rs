#![allow(dead_code)]

use iircore::config::FilterSpec;
use iircore::signal_processing::f32_to_i16;
use iircore::simulation::{Tone, multi_tone};

pub const SAMPLE_RATES: [f64; 3] = [100.0, 16000.0, 48000.0];

/// Every valid lowpass/highpass/bandpass spec on a coarse grid of orders,
/// cutoffs and sample rates
pub fn spec_grid() -> Vec<FilterSpec> {
    let mut specs = Vec::new();
    for &fs in &SAMPLE_RATES {
        for order in 1..=8 {
            for fraction in [0.01, 0.1, 0.25, 0.45] {
                let fc = fs * fraction;
                specs.push(FilterSpec::lowpass(order, fc, fs).unwrap());
                specs.push(FilterSpec::highpass(order, fc, fs).unwrap());
            }
            for (low, high) in [(0.05, 0.15), (0.01, 0.4), (0.2, 0.22)] {
                specs.push(FilterSpec::bandpass(order, fs * low, fs * high, fs).unwrap());
            }
        }
    }
    specs
}

/// Analog Butterworth magnitude after prewarping, i.e. the response a
/// bilinear-transformed design must reproduce exactly
pub fn ideal_lowpass_magnitude(freq: f64, cutoff: f64, fs: f64, order: u32) -> f64 {
    let x = (std::f64::consts::PI * freq / fs).tan() / (std::f64::consts::PI * cutoff / fs).tan();
    1.0 / (1.0 + x.powi(2 * order as i32)).sqrt()
}

pub fn ideal_highpass_magnitude(freq: f64, cutoff: f64, fs: f64, order: u32) -> f64 {
    let x = (std::f64::consts::PI * cutoff / fs).tan() / (std::f64::consts::PI * freq / fs).tan();
    1.0 / (1.0 + x.powi(2 * order as i32)).sqrt()
}

pub fn ideal_bandpass_magnitude(freq: f64, low: f64, high: f64, fs: f64, order: u32) -> f64 {
    let warp = |f: f64| (std::f64::consts::PI * f / fs).tan();
    let (w, wl, wh) = (warp(freq), warp(low), warp(high));
    let x = (w * w - wl * wh) / (w * (wh - wl));
    1.0 / (1.0 + x.powi(2 * order as i32)).sqrt()
}

/// Three-tone reference signal at roughly half of full scale
pub fn reference_signal(num_samples: usize, sample_rate: f32, freqs: [f32; 3]) -> Vec<f32> {
    multi_tone(
        num_samples,
        sample_rate,
        &[
            Tone::new(freqs[0], 0.3),
            Tone::new(freqs[1], 0.2),
            Tone::new(freqs[2], 0.1),
        ],
    )
}

pub fn to_pcm(signal: &[f32]) -> Vec<i16> {
    let mut pcm = vec![0i16; signal.len()];
    f32_to_i16(signal, &mut pcm).unwrap();
    pcm
}
