//! Butterworth IIR filter design and streaming execution.
//!
//! [`design`] turns a [`FilterSpec`] into an immutable [`SosCascade`];
//! [`BiquadCascade`] runs it over `f32` buffers and, after [`quantize`],
//! [`FixedBiquadCascade`] runs it with integer-only arithmetic.
//!
//! ```
//! use iircore::{BiquadCascade, FilterSpec, design};
//!
//! let cascade = design(&FilterSpec::highpass(4, 50.0, 8000.0)?)?;
//! let mut filter = BiquadCascade::new(cascade);
//! let mut chunk = [0.5f32; 64];
//! filter.process(&mut chunk);
//! # Ok::<(), iircore::FilterError>(())
//! ```

pub mod codec;
pub mod config;
pub mod constants;
pub mod design;
pub mod error;
pub mod output;
pub mod signal_processing;
pub mod sos;
pub mod wav;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use codec::{QuantizedCascade, quantize};
pub use config::{Cutoff, FilterKind, FilterSpec};
pub use design::{design, design_with_gain};
pub use error::{FilterError, Result};
pub use signal_processing::{BiquadCascade, Filter, FixedBiquadCascade};
pub use sos::{Section, SosCascade};
