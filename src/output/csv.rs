use super::{DesignOutput, Formatter};

/// One row per section: `name,section,c0..c5`
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, output: &DesignOutput<'_>) -> String {
        output
            .coefficients
            .values()
            .chunks(6)
            .enumerate()
            .map(|(i, c)| format!("{},{},{}", output.name, i, c.join(",")))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn header(&self) -> Option<&'static str> {
        Some("name,section,c0,c1,c2,c3,c4,c5")
    }
}
