use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use iircore::codec::quantize;
use iircore::config::{DesignFile, FilterConfig, FilterKind, Frequency, QuantizeConfig};
use iircore::design::design_with_gain;
use iircore::output::{Coefficients, DesignOutput, OutputFormat, create_formatter};

#[derive(Parser, Debug)]
#[command(name = "iir_design")]
#[command(about = "Design Butterworth IIR filters as second-order sections", long_about = None)]
struct Args {
    /// TOML design file with one or more [[filter]] tables
    #[arg(short, long, conflicts_with_all = ["kind", "order", "cutoff", "sample_rate"])]
    config: Option<PathBuf>,

    /// Filter type
    #[arg(short, long, value_enum)]
    kind: Option<FilterKind>,

    /// Filter order
    #[arg(short, long)]
    order: Option<u32>,

    /// Cutoff frequency, or "low,high" for bandpass (e.g. "1khz", "300,3400")
    #[arg(long, value_delimiter = ',', num_args = 1..=2)]
    cutoff: Vec<Frequency>,

    /// Sample rate (e.g. "48000", "16khz")
    #[arg(short, long)]
    sample_rate: Option<Frequency>,

    /// Gain at the normalization reference point
    #[arg(short, long, default_value_t = 1.0)]
    gain: f64,

    /// Emit Direct-Form-I i16 coefficients instead of floats
    #[arg(short, long)]
    quantize: bool,

    /// Quantization scale (implies --quantize)
    #[arg(long)]
    scale: Option<i32>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn filter_from_flags(&self) -> anyhow::Result<FilterConfig> {
        let kind = self.kind.context("--kind is required without --config")?;
        let order = self.order.context("--order is required without --config")?;
        let sample_rate = self
            .sample_rate
            .context("--sample-rate is required without --config")?;
        if self.cutoff.is_empty() {
            anyhow::bail!("--cutoff is required without --config");
        }
        Ok(FilterConfig {
            kind,
            order,
            cutoff: self.cutoff.iter().map(Frequency::as_hz).collect(),
            sample_rate: sample_rate.as_hz(),
            gain: Some(self.gain),
        })
    }

    fn quantize_config(&self, file: Option<QuantizeConfig>) -> Option<QuantizeConfig> {
        match (self.scale, self.quantize, file) {
            (Some(scale), _, _) => Some(QuantizeConfig { scale }),
            (None, true, file) => Some(file.unwrap_or_default()),
            (None, false, file) => file,
        }
    }
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

    let (filters, file_quantize) = match &args.config {
        Some(path) => {
            let file = DesignFile::load(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            if file.filter.is_empty() {
                anyhow::bail!("{} contains no [[filter]] tables", path.display());
            }
            (file.filter, file.quantize)
        }
        None => (vec![args.filter_from_flags()?], None),
    };
    let quantize_config = args.quantize_config(file_quantize);

    let formatter = create_formatter(args.format, args.verbose > 0);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }

    for (i, filter) in filters.iter().enumerate() {
        let spec = filter
            .to_spec()
            .with_context(|| format!("Invalid filter #{}", i))?;
        let cascade = design_with_gain(&spec, filter.gain())
            .with_context(|| format!("Failed to design {}", spec))?;
        log::info!(
            "{}: {} section(s), max pole magnitude {:.6}",
            spec,
            cascade.len(),
            cascade.max_pole_magnitude()
        );

        let quantized = match quantize_config {
            Some(q) => Some(
                quantize(&cascade, q.scale)
                    .with_context(|| format!("Failed to quantize {} at scale {}", spec, q.scale))?,
            ),
            None => None,
        };
        let coefficients = match &quantized {
            Some(q) => Coefficients::Quantized(q),
            None => Coefficients::Float(&cascade),
        };

        let output = DesignOutput {
            name: format!("{}{}", spec.kind(), i),
            spec,
            coefficients,
        };
        println!("{}", formatter.format(&output));
    }

    Ok(())
}
