/// Common trait for streaming sample filters
///
/// Implemented by [`super::BiquadCascade`] (`f32`) and
/// [`super::FixedBiquadCascade`] (`i16`). State carries over between calls,
/// so a signal may be fed in chunks of any size.
pub trait Filter {
    type Sample: Copy;

    /// Process a single sample through the filter
    fn process_sample(&mut self, sample: Self::Sample) -> Self::Sample;

    /// Process a buffer of samples in-place
    fn process_buffer(&mut self, buffer: &mut [Self::Sample]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    /// Clear all delay registers, as if no sample had been seen
    fn reset(&mut self);
}
