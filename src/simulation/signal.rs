use std::f64::consts::TAU;

/// One sinusoidal component of a test signal
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
pub struct Tone {
    pub freq_hz: f32,
    pub amplitude: f32,
    #[serde(default)]
    pub phase: f32,
}

impl Tone {
    pub fn new(freq_hz: f32, amplitude: f32) -> Self {
        Self {
            freq_hz,
            amplitude,
            phase: 0.0,
        }
    }
}

pub fn sine(num_samples: usize, sample_rate: f32, freq_hz: f32, amplitude: f32) -> Vec<f32> {
    multi_tone(num_samples, sample_rate, &[Tone::new(freq_hz, amplitude)])
}

/// Sum of sinusoids, starting at `t = 0`
pub fn multi_tone(num_samples: usize, sample_rate: f32, tones: &[Tone]) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            // f64 phase keeps long signals from drifting
            let t = i as f64 / sample_rate as f64;
            tones
                .iter()
                .map(|tone| {
                    let phase = (TAU * tone.freq_hz as f64 * t) % TAU;
                    tone.amplitude * (phase as f32 + tone.phase).sin()
                })
                .sum()
        })
        .collect()
}

pub fn dc(num_samples: usize, level: f32) -> Vec<f32> {
    vec![level; num_samples]
}
