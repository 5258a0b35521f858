use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Invalid filter specification: {0}")]
    InvalidSpec(String),

    #[error("Degenerate filter: {0}")]
    DegenerateFilter(String),

    #[error("Unstable filter: digital pole at magnitude {magnitude:.6} (must be < 1)")]
    UnstablePole { magnitude: f64 },

    #[error("Coefficient {value} does not fit in i16 at scale {scale}")]
    CoefficientOverflow { value: f64, scale: i32 },

    #[error("Section {section} numerator rounds to zero at scale {scale}")]
    CoefficientUnderflow { section: usize, scale: i32 },

    #[error("Invalid coefficients: {0}")]
    InvalidCoefficients(String),

    #[error("Buffer length mismatch: input has {input} samples, output has {output}")]
    LengthMismatch { input: usize, output: usize },
}

pub type Result<T> = std::result::Result<T, FilterError>;
