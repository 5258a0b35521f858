use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use rolling_stats::Stats;
use serde::Serialize;

use iircore::codec::quantize;
use iircore::config::{Cutoff, FilterKind, FilterSpec, Frequency};
use iircore::constants::DEFAULT_QUANTIZATION_SCALE;
use iircore::design::design_with_gain;
use iircore::signal_processing::{
    BiquadCascade, Filter, FixedBiquadCascade, f32_to_i16, i16_to_f32,
};
use iircore::wav::{WavEncoding, read_wav, save_wav};

#[derive(Parser, Debug)]
#[command(name = "filter_wav")]
#[command(about = "Filter a WAV file through a Butterworth biquad cascade", long_about = None)]
struct Args {
    /// Input WAV file
    input: PathBuf,

    /// Output WAV file
    output: PathBuf,

    /// Filter type
    #[arg(short, long, value_enum)]
    kind: FilterKind,

    /// Filter order
    #[arg(short, long, default_value_t = 4)]
    order: u32,

    /// Cutoff frequency, or "low,high" for bandpass
    #[arg(long, value_delimiter = ',', num_args = 1..=2, required = true)]
    cutoff: Vec<Frequency>,

    /// Gain at the normalization reference point
    #[arg(short, long, default_value_t = 1.0)]
    gain: f64,

    /// Arithmetic used to run the cascade
    #[arg(short, long, value_enum, default_value = "float")]
    mode: Mode,

    /// Coefficient scale for fixed-point mode
    #[arg(long, default_value_t = DEFAULT_QUANTIZATION_SCALE)]
    scale: i32,

    /// Samples per processing call
    #[arg(long, default_value_t = 256)]
    chunk_size: usize,

    /// Output sample encoding
    #[arg(short, long, value_enum, default_value = "float")]
    encoding: WavEncoding,

    /// Print per-channel statistics as JSON
    #[arg(long)]
    json: bool,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Mode {
    Float,
    Fixed,
}

#[derive(Debug, Clone, Serialize)]
struct StatsSummary {
    count: usize,
    mean: f32,
    std_dev: f32,
    min: f32,
    max: f32,
}

impl StatsSummary {
    fn from_stats(stats: &Stats<f32>) -> Option<Self> {
        if stats.count == 0 {
            return None;
        }
        Some(Self {
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChannelReport {
    channel: usize,
    input: Option<StatsSummary>,
    output: Option<StatsSummary>,
    gain_db: Option<f32>,
}

fn summarize(samples: &[f32]) -> (Option<StatsSummary>, f32) {
    let mut stats: Stats<f32> = Stats::new();
    let mut energy = 0.0f64;
    for &s in samples {
        stats.update(s);
        energy += s as f64 * s as f64;
    }
    let rms = if samples.is_empty() {
        0.0
    } else {
        (energy / samples.len() as f64).sqrt() as f32
    };
    (StatsSummary::from_stats(&stats), rms)
}

fn run_chunked<F: Filter>(filter: &mut F, samples: &mut [F::Sample], chunk_size: usize) {
    for chunk in samples.chunks_mut(chunk_size) {
        filter.process_buffer(chunk);
    }
}

fn build_spec(args: &Args, sample_rate: f64) -> anyhow::Result<FilterSpec> {
    let cutoff = match args.cutoff.as_slice() {
        [f] => Cutoff::Single(f.as_hz()),
        [low, high] => Cutoff::Band {
            low: low.as_hz(),
            high: high.as_hz(),
        },
        _ => anyhow::bail!("expected 1 or 2 cutoff frequencies"),
    };
    Ok(FilterSpec::new(args.kind, args.order, cutoff, sample_rate)?)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if args.chunk_size == 0 {
        anyhow::bail!("--chunk-size must be at least 1");
    }

    let mut wav = read_wav(&args.input)?;
    let spec = build_spec(&args, wav.sample_rate as f64)?;
    let cascade = Arc::new(
        design_with_gain(&spec, args.gain).with_context(|| format!("Failed to design {}", spec))?,
    );
    log::info!(
        "{}: {} channel(s), {} frames, {} section(s), {:?} mode",
        spec,
        wav.channels.len(),
        wav.num_frames(),
        cascade.len(),
        args.mode
    );

    let inputs = wav.channels.clone();
    match args.mode {
        Mode::Float => {
            for channel in wav.channels.iter_mut() {
                let mut filter = BiquadCascade::new(Arc::clone(&cascade));
                run_chunked(&mut filter, channel.as_mut_slice(), args.chunk_size);
            }
        }
        Mode::Fixed => {
            let quantized = quantize(&cascade, args.scale)
                .with_context(|| format!("Failed to quantize at scale {}", args.scale))?;
            for channel in wav.channels.iter_mut() {
                let mut pcm = vec![0i16; channel.len()];
                f32_to_i16(channel.as_slice(), &mut pcm)?;
                let mut filter = FixedBiquadCascade::new(quantized.clone());
                run_chunked(&mut filter, pcm.as_mut_slice(), args.chunk_size);
                i16_to_f32(&pcm, channel.as_mut_slice())?;
            }
        }
    }

    save_wav(&args.output, &wav.channels, wav.sample_rate, args.encoding)?;

    let reports: Vec<ChannelReport> = inputs
        .iter()
        .zip(&wav.channels)
        .enumerate()
        .map(|(channel, (input, output))| {
            let (input_stats, input_rms) = summarize(input);
            let (output_stats, output_rms) = summarize(output);
            let gain_db = (input_rms > 0.0 && output_rms > 0.0)
                .then(|| 20.0 * (output_rms / input_rms).log10());
            ChannelReport {
                channel,
                input: input_stats,
                output: output_stats,
                gain_db,
            }
        })
        .collect();

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&reports).context("Failed to serialize report")?
        );
    } else {
        eprintln!("Wrote {}", args.output.display());
        for r in &reports {
            let gain = r
                .gain_db
                .map(|g| format!("{:.2} dB", g))
                .unwrap_or_else(|| "-".to_string());
            let (min, max) = r
                .output
                .as_ref()
                .map_or((0.0, 0.0), |s| (s.min, s.max));
            println!(
                "channel {}: gain {}, output range [{:.4}, {:.4}]",
                r.channel, gain, min, max
            );
        }
    }

    Ok(())
}
