use serde_json::json;

use super::{Coefficients, DesignOutput, Formatter, iso8601_timestamp};
use crate::config::FilterConfig;

/// One JSON object per filter (JSON Lines when several are printed)
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, output: &DesignOutput<'_>) -> String {
        let sections = match output.coefficients {
            Coefficients::Float(c) => {
                let rows: Vec<[f64; 6]> = c.sections().iter().map(|s| s.to_array()).collect();
                json!(rows)
            }
            Coefficients::Quantized(q) => json!(q.sections()),
        };
        json!({
            "ts": iso8601_timestamp(),
            "name": output.name,
            "filter": FilterConfig::from(&output.spec),
            "scale": output.coefficients.scale(),
            "sections": sections,
        })
        .to_string()
    }
}
