use super::signal::sine;
use crate::signal_processing::Filter;

pub fn rms(signal: &[f32]) -> f32 {
    super::noise::signal_power(signal).sqrt()
}

/// RMS of `actual - reference` over RMS of `reference`
pub fn relative_rms_error(actual: &[f32], reference: &[f32]) -> f64 {
    let (num, den) = actual
        .iter()
        .zip(reference)
        .fold((0.0f64, 0.0f64), |(num, den), (&a, &r)| {
            let diff = a as f64 - r as f64;
            (num + diff * diff, den + r as f64 * r as f64)
        });
    if den == 0.0 {
        return if num == 0.0 { 0.0 } else { f64::INFINITY };
    }
    (num / den).sqrt()
}

/// Output/input RMS ratio after discarding the first `settle` samples
pub fn steady_state_gain(input: &[f32], output: &[f32], settle: usize) -> f32 {
    let settle = settle.min(input.len());
    let input_rms = rms(&input[settle..]);
    if input_rms == 0.0 {
        return 0.0;
    }
    rms(&output[settle..]) / input_rms
}

/// Measured magnitude response of `filter` at `freq_hz`
///
/// Feeds one second of a unit sine (at least 4096 samples) and skips the
/// first half as transient.
pub fn tone_gain<F: Filter<Sample = f32>>(filter: &mut F, freq_hz: f32, sample_rate: f32) -> f32 {
    let len = (sample_rate as usize).max(4096);
    let input = sine(len, sample_rate, freq_hz, 1.0);
    let mut output = input.clone();
    filter.reset();
    filter.process_buffer(&mut output);
    steady_state_gain(&input, &output, len / 2)
}
