mod c;
mod csv;
mod json;
mod text;

use chrono::Utc;

use crate::codec::QuantizedCascade;
use crate::config::FilterSpec;
use crate::sos::SosCascade;

pub use self::c::CFormatter;
pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
    C,
}

/// Coefficients to print, float or quantized
#[derive(Debug, Clone, Copy)]
pub enum Coefficients<'a> {
    Float(&'a SosCascade),
    Quantized(&'a QuantizedCascade),
}

impl Coefficients<'_> {
    /// Flat wire-format values rendered as text, 6 per section
    pub fn values(&self) -> Vec<String> {
        match self {
            Coefficients::Float(c) => c.to_flat().iter().map(|v| v.to_string()).collect(),
            Coefficients::Quantized(q) => q.to_flat().iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn sections(&self) -> usize {
        match self {
            Coefficients::Float(c) => c.len(),
            Coefficients::Quantized(q) => q.len(),
        }
    }

    pub fn scale(&self) -> Option<i32> {
        match self {
            Coefficients::Float(_) => None,
            Coefficients::Quantized(q) => Some(q.scale()),
        }
    }
}

/// One designed filter, ready to be printed
pub struct DesignOutput<'a> {
    /// Identifier used for C symbols and CSV rows
    pub name: String,
    pub spec: FilterSpec,
    pub coefficients: Coefficients<'a>,
}

pub trait Formatter: Send {
    fn format(&self, output: &DesignOutput<'_>) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
        OutputFormat::C => Box::new(CFormatter),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
