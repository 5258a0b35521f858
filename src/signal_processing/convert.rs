//! Sample format conversion between normalized `f32` and `i16` PCM.
//!
//! Full scale is 32768 in both directions, so `-1.0 <-> i16::MIN`. Values
//! outside the representable range saturate.

use crate::error::{FilterError, Result};

const FULL_SCALE: f32 = 32768.0;

fn check_lengths(input: usize, output: usize) -> Result<()> {
    if input != output {
        return Err(FilterError::LengthMismatch { input, output });
    }
    Ok(())
}

pub fn i16_to_f32(input: &[i16], output: &mut [f32]) -> Result<()> {
    check_lengths(input.len(), output.len())?;
    for (out, &x) in output.iter_mut().zip(input) {
        *out = x as f32 / FULL_SCALE;
    }
    Ok(())
}

pub fn f32_to_i16(input: &[f32], output: &mut [i16]) -> Result<()> {
    check_lengths(input.len(), output.len())?;
    for (out, &x) in output.iter_mut().zip(input) {
        // `as` saturates and maps NaN to 0
        *out = (x * FULL_SCALE).round() as i16;
    }
    Ok(())
}
