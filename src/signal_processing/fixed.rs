use super::filter::Filter;
use crate::codec::QuantizedCascade;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct FixedState {
    x1: i16,
    x2: i16,
    y1: i16,
    y2: i16,
}

/// Integer-only biquad cascade in Direct-Form-I
///
/// Products accumulate in `i64` and are brought back to `i16` by a rounding
/// right shift of [`QuantizedCascade::shift`] bits, then saturated. Section
/// outputs saturate too, so an overloaded stage clips instead of wrapping.
#[derive(Debug, Clone)]
pub struct FixedBiquadCascade {
    coefficients: QuantizedCascade,
    states: Vec<FixedState>,
    shift: u32,
}

impl FixedBiquadCascade {
    pub fn new(coefficients: QuantizedCascade) -> Self {
        let states = vec![FixedState::default(); coefficients.len()];
        let shift = coefficients.shift();
        Self {
            coefficients,
            states,
            shift,
        }
    }

    pub fn coefficients(&self) -> &QuantizedCascade {
        &self.coefficients
    }

    pub fn reset(&mut self) {
        self.states.fill(FixedState::default());
    }

    pub fn process_sample(&mut self, sample: i16) -> i16 {
        let round = 1i64 << (self.shift - 1);
        let mut x = sample;
        for (c, state) in self
            .coefficients
            .sections()
            .iter()
            .zip(self.states.iter_mut())
        {
            let acc = c[0] as i64 * x as i64
                + c[2] as i64 * state.x1 as i64
                + c[3] as i64 * state.x2 as i64
                + c[4] as i64 * state.y1 as i64
                + c[5] as i64 * state.y2 as i64;
            let y = saturate((acc + round) >> self.shift);

            state.x2 = state.x1;
            state.x1 = x;
            state.y2 = state.y1;
            state.y1 = y;
            x = y;
        }
        x
    }

    /// Filter `samples` in place, continuing from the previous call's state
    pub fn process(&mut self, samples: &mut [i16]) {
        for sample in samples.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }
}

fn saturate(value: i64) -> i16 {
    value.clamp(i16::MIN as i64, i16::MAX as i64) as i16
}

impl Filter for FixedBiquadCascade {
    type Sample = i16;

    fn process_sample(&mut self, sample: i16) -> i16 {
        FixedBiquadCascade::process_sample(self, sample)
    }

    fn process_buffer(&mut self, buffer: &mut [i16]) {
        self.process(buffer);
    }

    fn reset(&mut self) {
        FixedBiquadCascade::reset(self);
    }
}
