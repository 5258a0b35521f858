//! Filter specifications and file-based design configuration.
//!
//! A [`FilterSpec`] is the validated, immutable request handed to
//! [`crate::design::design`]. Design files are TOML documents holding one or
//! more `[[filter]]` tables:
//!
//! ```toml
//! [[filter]]
//! kind = "bandpass"
//! order = 2
//! cutoff = [5.0, 15.0]
//! sample_rate = 100.0
//!
//! [quantize]
//! scale = 8191
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_QUANTIZATION_SCALE, MAX_RECOMMENDED_ORDER};
use crate::error::{FilterError, Result};

/// Butterworth response shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// Passes DC, attenuates above the cutoff
    Lowpass,
    /// Passes Nyquist, attenuates below the cutoff
    Highpass,
    /// Passes the band between two cutoffs
    Bandpass,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterKind::Lowpass => "lowpass",
            FilterKind::Highpass => "highpass",
            FilterKind::Bandpass => "bandpass",
        };
        f.write_str(name)
    }
}

/// Cutoff frequency (or band edges) in Hz
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cutoff {
    Single(f64),
    Band { low: f64, high: f64 },
}

/// Validated Butterworth filter request
///
/// Construct through [`FilterSpec::lowpass`], [`FilterSpec::highpass`],
/// [`FilterSpec::bandpass`] or [`FilterSpec::new`]; every constructor checks
/// the order and cutoff range before any numeric work happens.
///
/// # Example
/// ```
/// use iircore::config::FilterSpec;
///
/// let spec = FilterSpec::lowpass(4, 100.0, 1000.0).unwrap();
/// assert_eq!(spec.order(), 4);
/// assert!(FilterSpec::lowpass(0, 100.0, 1000.0).is_err());
/// assert!(FilterSpec::lowpass(2, 500.0, 1000.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    kind: FilterKind,
    order: u32,
    cutoff: Cutoff,
    sample_rate: f64,
}

impl FilterSpec {
    pub fn new(kind: FilterKind, order: u32, cutoff: Cutoff, sample_rate: f64) -> Result<Self> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(FilterError::InvalidSpec(format!(
                "sample rate must be positive and finite, got {}",
                sample_rate
            )));
        }
        if order == 0 {
            return Err(FilterError::InvalidSpec(
                "filter order must be at least 1".to_string(),
            ));
        }

        let nyquist = sample_rate / 2.0;
        match (kind, cutoff) {
            (FilterKind::Lowpass | FilterKind::Highpass, Cutoff::Single(f)) => {
                check_frequency(f, nyquist, "cutoff")?;
            }
            (FilterKind::Bandpass, Cutoff::Band { low, high }) => {
                check_frequency(low, nyquist, "low cutoff")?;
                check_frequency(high, nyquist, "high cutoff")?;
                if low >= high {
                    return Err(FilterError::InvalidSpec(format!(
                        "low cutoff {} Hz must be below high cutoff {} Hz",
                        low, high
                    )));
                }
            }
            (FilterKind::Bandpass, Cutoff::Single(_)) => {
                return Err(FilterError::InvalidSpec(
                    "bandpass filter requires two cutoff frequencies".to_string(),
                ));
            }
            (_, Cutoff::Band { .. }) => {
                return Err(FilterError::InvalidSpec(format!(
                    "{} filter takes a single cutoff frequency",
                    kind
                )));
            }
        }

        if order > MAX_RECOMMENDED_ORDER {
            log::warn!(
                "Order {} exceeds {}; pole pairing may be numerically fragile",
                order,
                MAX_RECOMMENDED_ORDER
            );
        }

        Ok(Self {
            kind,
            order,
            cutoff,
            sample_rate,
        })
    }

    pub fn lowpass(order: u32, cutoff_hz: f64, sample_rate: f64) -> Result<Self> {
        Self::new(FilterKind::Lowpass, order, Cutoff::Single(cutoff_hz), sample_rate)
    }

    pub fn highpass(order: u32, cutoff_hz: f64, sample_rate: f64) -> Result<Self> {
        Self::new(FilterKind::Highpass, order, Cutoff::Single(cutoff_hz), sample_rate)
    }

    pub fn bandpass(order: u32, low_hz: f64, high_hz: f64, sample_rate: f64) -> Result<Self> {
        Self::new(
            FilterKind::Bandpass,
            order,
            Cutoff::Band {
                low: low_hz,
                high: high_hz,
            },
            sample_rate,
        )
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn cutoff(&self) -> Cutoff {
        self.cutoff
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cutoff {
            Cutoff::Single(hz) => write!(
                f,
                "{} order {} @ {} Hz (fs {} Hz)",
                self.kind, self.order, hz, self.sample_rate
            ),
            Cutoff::Band { low, high } => write!(
                f,
                "{} order {} @ {}-{} Hz (fs {} Hz)",
                self.kind, self.order, low, high, self.sample_rate
            ),
        }
    }
}

fn check_frequency(hz: f64, nyquist: f64, what: &str) -> Result<()> {
    if !hz.is_finite() || hz <= 0.0 || hz >= nyquist {
        return Err(FilterError::InvalidSpec(format!(
            "{} {} Hz must lie strictly between 0 and Nyquist ({} Hz)",
            what, hz, nyquist
        )));
    }
    Ok(())
}

/// Frequency in Hz, parsed from CLI-friendly strings
///
/// # Parsing formats
/// - `100` - Hz (no suffix)
/// - `100hz` or `100Hz` - Hz (explicit)
/// - `1.5khz` or `1.5kHz` - kilohertz
///
/// # Example
/// ```
/// use iircore::config::Frequency;
///
/// let f: Frequency = "1.5khz".parse().unwrap();
/// assert!((f.as_hz() - 1500.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frequency(f64);

impl Frequency {
    pub fn from_hz(hz: f64) -> Self {
        Self(hz)
    }

    pub fn as_hz(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hz", self.0)
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();

        let (num, multiplier) = if let Some(num) = lower.strip_suffix("khz") {
            (num, 1000.0)
        } else if let Some(num) = lower.strip_suffix("hz") {
            (num, 1.0)
        } else {
            (lower.as_str(), 1.0)
        };

        let value: f64 = num
            .trim()
            .parse()
            .map_err(|_| format!("invalid frequency: {}", s))?;
        if !value.is_finite() || value <= 0.0 {
            return Err("frequency must be positive".to_string());
        }
        Ok(Self(value * multiplier))
    }
}

/// One `[[filter]]` table of a design file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub kind: FilterKind,
    pub order: u32,
    /// One cutoff for lowpass/highpass, `[low, high]` for bandpass
    pub cutoff: Vec<f64>,
    pub sample_rate: f64,
    /// Target gain at the normalization reference point (defaults to 1.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gain: Option<f64>,
}

impl FilterConfig {
    /// Validate into a [`FilterSpec`]
    pub fn to_spec(&self) -> Result<FilterSpec> {
        let cutoff = match self.cutoff.as_slice() {
            [f] => Cutoff::Single(*f),
            [low, high] => Cutoff::Band {
                low: *low,
                high: *high,
            },
            other => {
                return Err(FilterError::InvalidSpec(format!(
                    "expected 1 or 2 cutoff frequencies, got {}",
                    other.len()
                )));
            }
        };
        FilterSpec::new(self.kind, self.order, cutoff, self.sample_rate)
    }

    pub fn gain(&self) -> f64 {
        self.gain.unwrap_or(1.0)
    }
}

impl From<&FilterSpec> for FilterConfig {
    fn from(spec: &FilterSpec) -> Self {
        let cutoff = match spec.cutoff() {
            Cutoff::Single(f) => vec![f],
            Cutoff::Band { low, high } => vec![low, high],
        };
        Self {
            kind: spec.kind(),
            order: spec.order(),
            cutoff,
            sample_rate: spec.sample_rate(),
            gain: None,
        }
    }
}

/// Fixed-point export configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantizeConfig {
    /// Integer scale applied to every coefficient (default 2^13 - 1)
    #[serde(default = "default_scale")]
    pub scale: i32,
}

fn default_scale() -> i32 {
    DEFAULT_QUANTIZATION_SCALE
}

impl Default for QuantizeConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_QUANTIZATION_SCALE,
        }
    }
}

/// Contents of a TOML design file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignFile {
    #[serde(default)]
    pub filter: Vec<FilterConfig>,
    pub quantize: Option<QuantizeConfig>,
}

impl DesignFile {
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Failed to parse design file")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read design file")?;
        Self::parse(&content)
    }
}
