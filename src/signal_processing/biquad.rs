use std::sync::Arc;

use super::filter::Filter;
use crate::sos::SosCascade;

/// Delay registers of one transposed Direct-Form-II section
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BiquadState {
    pub w1: f64,
    pub w2: f64,
}

/// Floating-point biquad cascade bound to a single stream
///
/// The cascade itself is shared read-only; each instance owns one
/// [`BiquadState`] per section. Create one instance per independent stream.
/// Arithmetic runs in `f64` and is rounded to `f32` only on output.
///
/// # Example
/// ```
/// use iircore::config::FilterSpec;
/// use iircore::design::design;
/// use iircore::signal_processing::BiquadCascade;
///
/// let cascade = design(&FilterSpec::lowpass(2, 10.0, 100.0).unwrap()).unwrap();
/// let mut filter = BiquadCascade::new(cascade);
/// let mut samples = vec![1.0f32; 200];
/// filter.process(&mut samples);
/// assert!((samples[199] - 1.0).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct BiquadCascade {
    cascade: Arc<SosCascade>,
    states: Vec<BiquadState>,
}

impl BiquadCascade {
    pub fn new(cascade: impl Into<Arc<SosCascade>>) -> Self {
        let cascade = cascade.into();
        let states = vec![BiquadState::default(); cascade.len()];
        Self { cascade, states }
    }

    pub fn cascade(&self) -> &Arc<SosCascade> {
        &self.cascade
    }

    /// Current delay registers, one entry per section
    pub fn state(&self) -> &[BiquadState] {
        &self.states
    }

    pub fn reset(&mut self) {
        self.states.fill(BiquadState::default());
    }

    pub fn process_sample(&mut self, sample: f32) -> f32 {
        let mut x = sample as f64;
        for (section, state) in self.cascade.sections().iter().zip(self.states.iter_mut()) {
            let y = section.b0() * x + state.w1;
            state.w1 = section.b1() * x - section.a1() * y + state.w2;
            state.w2 = section.b2() * x - section.a2() * y;
            x = y;
        }
        x as f32
    }

    /// Filter `samples` in place, continuing from the state left by the
    /// previous call
    pub fn process(&mut self, samples: &mut [f32]) {
        for sample in samples.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }
}

impl Filter for BiquadCascade {
    type Sample = f32;

    fn process_sample(&mut self, sample: f32) -> f32 {
        BiquadCascade::process_sample(self, sample)
    }

    fn process_buffer(&mut self, buffer: &mut [f32]) {
        self.process(buffer);
    }

    fn reset(&mut self) {
        BiquadCascade::reset(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterSpec;
    use crate::design::design;
    use std::f32::consts::PI;

    fn lowpass() -> SosCascade {
        design(&FilterSpec::lowpass(2, 10.0, 100.0).unwrap()).unwrap()
    }

    fn test_signal(len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| {
                let t = i as f32 / 100.0;
                (2.0 * PI * 3.0 * t).sin() + 0.5 * (2.0 * PI * 30.0 * t).sin()
            })
            .collect()
    }

    #[test]
    fn test_impulse_response_starts_with_b0() {
        let cascade = lowpass();
        let b0 = cascade.sections()[0].b0();
        let mut filter = BiquadCascade::new(cascade);
        let mut impulse = vec![0.0f32; 8];
        impulse[0] = 1.0;
        filter.process(&mut impulse);
        assert!((impulse[0] as f64 - b0).abs() < 1e-7);
    }

    #[test]
    fn test_dc_converges_to_unity() {
        let mut filter = BiquadCascade::new(lowpass());
        let mut samples = vec![1.0f32; 1000];
        filter.process(&mut samples);
        for &y in &samples[900..] {
            assert!((y - 1.0).abs() < 1e-5, "Expected ~1.0, got {}", y);
        }
    }

    #[test]
    fn test_streaming_matches_single_call() {
        let input = test_signal(500);

        let mut whole = input.clone();
        BiquadCascade::new(lowpass()).process(&mut whole);

        for split in [1, 137, 250, 499] {
            let mut chunked = input.clone();
            let mut filter = BiquadCascade::new(lowpass());
            let (a, b) = chunked.split_at_mut(split);
            filter.process(a);
            filter.process(b);
            for (x, y) in whole.iter().zip(&chunked) {
                assert!((x - y).abs() <= 1e-5, "split {}: {} vs {}", split, x, y);
            }
        }
    }

    #[test]
    fn test_reset_clears_state() {
        let mut filter = BiquadCascade::new(lowpass());
        let mut first = test_signal(100);
        filter.process(&mut first);
        assert!(filter.state().iter().any(|s| s.w1 != 0.0));

        filter.reset();
        assert!(filter.state().iter().all(|s| *s == BiquadState::default()));

        let mut again = test_signal(100);
        filter.process(&mut again);
        assert_eq!(first, again);
    }

    #[test]
    fn test_shared_cascade_across_threads() {
        let cascade = Arc::new(lowpass());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cascade = Arc::clone(&cascade);
                std::thread::spawn(move || {
                    let mut filter = BiquadCascade::new(cascade);
                    let mut samples = test_signal(300);
                    filter.process(&mut samples);
                    samples
                })
            })
            .collect();

        let outputs: Vec<Vec<f32>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for out in &outputs[1..] {
            assert_eq!(out, &outputs[0]);
        }
    }

    #[test]
    fn test_filter_trait_dispatch() {
        let mut direct = BiquadCascade::new(lowpass());
        let mut via_trait: Box<dyn Filter<Sample = f32>> = Box::new(BiquadCascade::new(lowpass()));

        let mut a = test_signal(64);
        let mut b = a.clone();
        direct.process(&mut a);
        via_trait.process_buffer(&mut b);
        assert_eq!(a, b);
    }
}
