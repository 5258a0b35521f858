use super::{Coefficients, DesignOutput, Formatter, iso8601_timestamp};

/// C array definition, ready to paste into firmware sources
pub struct CFormatter;

impl CFormatter {
    fn symbol(name: &str) -> String {
        let mut symbol: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        if symbol.chars().next().is_none_or(|c| c.is_ascii_digit()) {
            symbol.insert(0, '_');
        }
        symbol
    }
}

impl Formatter for CFormatter {
    fn format(&self, output: &DesignOutput<'_>) -> String {
        let symbol = Self::symbol(&output.name);
        let (decl, values, note) = match output.coefficients {
            Coefficients::Float(c) => (
                format!("static const float {}_sos", symbol),
                c.to_flat()
                    .iter()
                    .map(|&v| format!("{:?}f", v as f32))
                    .collect::<Vec<_>>(),
                String::new(),
            ),
            Coefficients::Quantized(q) => (
                format!("static const int16_t {}_q", symbol),
                q.to_flat().iter().map(|v| v.to_string()).collect(),
                format!(" scale {}, shift {};", q.scale(), q.shift()),
            ),
        };

        let body = values
            .chunks(6)
            .map(|c| format!("    {},", c.join(", ")))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "/* {};{} generated {} */\n{}[{}] = {{\n{}\n}};",
            output.spec,
            note,
            iso8601_timestamp(),
            decl,
            values.len(),
            body
        )
    }
}
