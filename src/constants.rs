//! Numeric constants for filter design and fixed-point execution
//!
//! These constants define tolerances used while placing and pairing poles,
//! and the default quantization parameters of the fixed-point runtime.

/// Imaginary parts smaller than this are treated as exactly zero.
/// Trigonometric pole placement leaves ~1e-17 residue on poles that are
/// mathematically real (the middle pole of an odd-order prototype).
pub const REAL_AXIS_EPSILON: f64 = 1e-12;

/// Reference-point magnitudes below this are considered zero during gain
/// normalization.
pub const MIN_REFERENCE_GAIN: f64 = 1e-300;

/// Default coefficient scale for the fixed-point runtime (Q13).
pub const DEFAULT_QUANTIZATION_SCALE: i32 = (1 << 13) - 1;

/// Orders above this are accepted but pairing becomes numerically fragile.
pub const MAX_RECOMMENDED_ORDER: u32 = 8;

/// Number of coefficients per second-order section in the flat wire format.
pub const COEFFICIENTS_PER_SECTION: usize = 6;
