pub mod biquad;
pub mod convert;
pub mod filter;
pub mod fixed;

pub use biquad::{BiquadCascade, BiquadState};
pub use convert::{f32_to_i16, i16_to_f32};
pub use filter::Filter;
pub use fixed::FixedBiquadCascade;
