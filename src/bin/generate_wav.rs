use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use iircore::config::Frequency;
use iircore::simulation::{NoiseConfig, Tone, add_noise, multi_tone};
use iircore::wav::{WavEncoding, save_wav};

#[derive(Parser, Debug)]
#[command(name = "generate_wav")]
#[command(about = "Generate multi-tone test WAV files with optional white noise")]
struct Args {
    /// Output WAV file
    output: PathBuf,

    /// TOML signal configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tones as "freq:amplitude", comma-separated (e.g. "440:0.5,3khz:0.1")
    #[arg(short, long, default_value = "1000:0.5")]
    tones: String,

    /// Signal duration in seconds
    #[arg(short, long, default_value_t = 1.0)]
    duration: f32,

    /// Sample rate in Hz
    #[arg(long, default_value_t = 48000)]
    sample_rate: u32,

    /// AWGN SNR in dB (CLI override)
    #[arg(long)]
    snr: Option<f32>,

    /// Seed for reproducible noise
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output sample encoding
    #[arg(short, long, value_enum, default_value = "int16")]
    encoding: WavEncoding,
}

#[derive(Debug, Deserialize, Default)]
struct TomlConfig {
    #[serde(default)]
    tone: Vec<Tone>,
    noise: Option<NoiseConfig>,
}

fn parse_tones(s: &str) -> Result<Vec<Tone>> {
    s.split(',')
        .map(|part| {
            let (freq, amp) = part
                .trim()
                .split_once(':')
                .context("Invalid tone format. Use 'freq:amplitude'")?;
            let freq: Frequency = freq
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .context("Invalid tone frequency")?;
            let amplitude: f32 = amp.trim().parse().context("Invalid tone amplitude")?;
            Ok(Tone::new(freq.as_hz() as f32, amplitude))
        })
        .collect()
}

fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&content).context("Failed to parse config file")
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let toml_config = match args.config {
        Some(ref path) => load_toml_config(path)?,
        None => TomlConfig::default(),
    };

    let tones = if toml_config.tone.is_empty() {
        parse_tones(&args.tones)?
    } else {
        toml_config.tone
    };

    let mut noise = toml_config.noise.unwrap_or_default();
    if let Some(snr) = args.snr {
        noise.snr_db = Some(snr);
    }
    if let Some(seed) = args.seed {
        noise.seed = Some(seed);
    }

    let nyquist = args.sample_rate as f32 / 2.0;
    for tone in &tones {
        if tone.freq_hz >= nyquist {
            log::warn!("{} Hz tone is at or above Nyquist and will alias", tone.freq_hz);
        }
    }

    let num_samples = (args.duration * args.sample_rate as f32) as usize;
    let clean = multi_tone(num_samples, args.sample_rate as f32, &tones);
    let signal = add_noise(&clean, &noise);

    let peak = signal.iter().fold(0.0f32, |m, &x| m.max(x.abs()));
    if peak > 1.0 && args.encoding == WavEncoding::Int16 {
        log::warn!("Peak amplitude {:.3} exceeds full scale and will clip", peak);
    }

    save_wav(&args.output, &[signal], args.sample_rate, args.encoding)
        .context("Failed to write WAV file")?;

    eprintln!(
        "Generated {} samples ({} tone(s), SNR {}) in {}",
        num_samples,
        tones.len(),
        noise
            .snr_db
            .map_or("clean".to_string(), |s| format!("{} dB", s)),
        args.output.display()
    );
    Ok(())
}
