//! Deterministic test signals and response measurement.
//!
//! Enabled by the `simulation` feature; used by the integration tests and the
//! `generate_wav` tool.

mod measure;
mod noise;
mod signal;

pub use measure::{relative_rms_error, rms, steady_state_gain, tone_gain};
pub use noise::{NoiseConfig, add_noise, signal_power, white_noise};
pub use signal::{Tone, dc, multi_tone, sine};
