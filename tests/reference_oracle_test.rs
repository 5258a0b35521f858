//! Cross-check designed cascades against the `iir_filters` Butterworth
//! implementation by running the same sinusoids through both.

mod test_signals;

use iir_filters::filter::{DirectForm2Transposed, Filter};
use iir_filters::filter_design::{FilterType, butter};
use iir_filters::sos::zpk2sos;

use iircore::config::FilterSpec;
use iircore::design::design;
use iircore::signal_processing::BiquadCascade;
use iircore::simulation::{sine, steady_state_gain};

const SAMPLE_RATE: f64 = 48000.0;
const NUM_SAMPLES: usize = 48000;

fn oracle_gain(order: u32, filter_type: FilterType, freq: f32) -> f32 {
    let zpk = butter(order, filter_type, SAMPLE_RATE).unwrap();
    let sos = zpk2sos(&zpk, None).unwrap();
    let mut filter = DirectForm2Transposed::new(&sos);

    let input = sine(NUM_SAMPLES, SAMPLE_RATE as f32, freq, 1.0);
    let output: Vec<f32> = input
        .iter()
        .map(|&x| filter.filter(x as f64) as f32)
        .collect();
    steady_state_gain(&input, &output, NUM_SAMPLES / 2)
}

fn our_gain(spec: &FilterSpec, freq: f32) -> f32 {
    let mut filter = BiquadCascade::new(design(spec).unwrap());
    let input = sine(NUM_SAMPLES, SAMPLE_RATE as f32, freq, 1.0);
    let mut output = input.clone();
    filter.process(&mut output);
    steady_state_gain(&input, &output, NUM_SAMPLES / 2)
}

fn assert_gains_match(ours: f32, oracle: f32, freq: f32) {
    // Relative in the passband, absolute deep in the stopband
    let tolerance = (0.02 * oracle).max(1e-3);
    assert!(
        (ours - oracle).abs() <= tolerance,
        "{} Hz: ours {}, oracle {}",
        freq,
        ours,
        oracle
    );
}

#[test]
fn test_lowpass_matches_oracle() {
    for order in [2, 4, 5] {
        let spec = FilterSpec::lowpass(order, 1000.0, SAMPLE_RATE).unwrap();
        for freq in [100.0, 500.0, 1000.0, 1500.0, 3000.0] {
            let ours = our_gain(&spec, freq);
            let oracle = oracle_gain(order, FilterType::LowPass(1000.0), freq);
            assert_gains_match(ours, oracle, freq);
        }
    }
}

#[test]
fn test_highpass_matches_oracle() {
    for order in [1, 2, 4] {
        let spec = FilterSpec::highpass(order, 1000.0, SAMPLE_RATE).unwrap();
        for freq in [300.0, 700.0, 1000.0, 2000.0, 8000.0] {
            let ours = our_gain(&spec, freq);
            let oracle = oracle_gain(order, FilterType::HighPass(1000.0), freq);
            assert_gains_match(ours, oracle, freq);
        }
    }
}

#[test]
fn test_bandpass_matches_oracle() {
    for order in [2, 4] {
        let spec = FilterSpec::bandpass(order, 800.0, 2000.0, SAMPLE_RATE).unwrap();
        for freq in [400.0, 800.0, 1250.0, 2000.0, 4000.0] {
            let ours = our_gain(&spec, freq);
            let oracle = oracle_gain(order, FilterType::BandPass(800.0, 2000.0), freq);
            assert_gains_match(ours, oracle, freq);
        }
    }
}
