use super::{Coefficients, DesignOutput, Formatter};

/// Comma-separated flat coefficient list, one filter per line
pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, output: &DesignOutput<'_>) -> String {
        let values = output.coefficients.values().join(", ");
        if !self.verbose {
            return values;
        }

        let scale = match output.coefficients {
            Coefficients::Float(_) => String::new(),
            Coefficients::Quantized(q) => format!(", scale {} (shift {})", q.scale(), q.shift()),
        };
        format!(
            "# {}: {}, {} section(s){}\n{}",
            output.name,
            output.spec,
            output.coefficients.sections(),
            scale,
            values
        )
    }
}
