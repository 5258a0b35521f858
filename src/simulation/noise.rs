use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Additive white Gaussian noise, specified relative to the signal
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct NoiseConfig {
    pub seed: Option<u64>,
    pub snr_db: Option<f32>,
}

impl NoiseConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_awgn(mut self, snr_db: f32) -> Self {
        self.snr_db = Some(snr_db);
        self
    }
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

pub fn signal_power(signal: &[f32]) -> f32 {
    if signal.is_empty() {
        return 0.0;
    }
    signal.iter().map(|&x| x * x).sum::<f32>() / signal.len() as f32
}

/// Zero-mean Gaussian noise with standard deviation `std_dev`
pub fn white_noise(num_samples: usize, std_dev: f32, seed: Option<u64>) -> Vec<f32> {
    let mut rng = create_rng(seed);
    let Ok(normal) = Normal::new(0.0, std_dev as f64) else {
        log::warn!("Invalid noise standard deviation {}", std_dev);
        return vec![0.0; num_samples];
    };
    (0..num_samples)
        .map(|_| normal.sample(&mut rng) as f32)
        .collect()
}

/// Return `signal` with noise added at the configured SNR
pub fn add_noise(signal: &[f32], config: &NoiseConfig) -> Vec<f32> {
    let mut out = signal.to_vec();
    let Some(snr_db) = config.snr_db else {
        return out;
    };
    let sig_power = signal_power(signal);
    if sig_power == 0.0 {
        return out;
    }

    let snr_linear = 10.0_f32.powf(snr_db / 10.0);
    let noise_std = (sig_power / snr_linear).sqrt();
    let noise = white_noise(signal.len(), noise_std, config.seed);
    for (sample, n) in out.iter_mut().zip(noise) {
        *sample += n;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean() -> Vec<f32> {
        (0..1000).map(|i| (i as f32 * 0.1).sin()).collect()
    }

    #[test]
    fn test_additive_noise_changes_signal() {
        let config = NoiseConfig::default().with_seed(42).with_awgn(10.0);
        let noisy = add_noise(&clean(), &config);
        assert_eq!(noisy.len(), 1000);
        assert_ne!(clean(), noisy);
    }

    #[test]
    fn test_seeded_rng_reproducibility() {
        let config = NoiseConfig::default().with_seed(12345).with_awgn(20.0);
        assert_eq!(add_noise(&clean(), &config), add_noise(&clean(), &config));
    }

    #[test]
    fn test_snr_is_respected() {
        let signal = clean();
        let noisy = add_noise(&signal, &NoiseConfig::default().with_seed(7).with_awgn(10.0));
        let noise: Vec<f32> = noisy.iter().zip(&signal).map(|(n, s)| n - s).collect();
        let snr_db = 10.0 * (signal_power(&signal) / signal_power(&noise)).log10();
        assert!((snr_db - 10.0).abs() < 1.0, "SNR {} dB", snr_db);
    }

    #[test]
    fn test_no_snr_is_passthrough() {
        assert_eq!(add_noise(&clean(), &NoiseConfig::default()), clean());
    }

    #[test]
    fn test_white_noise_statistics() {
        let n = white_noise(20000, 0.5, Some(1));
        let mean = n.iter().sum::<f32>() / n.len() as f32;
        assert!(mean.abs() < 0.02, "mean {}", mean);
        assert!((signal_power(&n).sqrt() - 0.5).abs() < 0.02);
    }
}
