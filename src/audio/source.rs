use std::sync::Arc;

use super::parameters::NoiseParameters;
use crate::dsp::noise::NoiseGenerator;

/// Pull-based white noise provider
/// Runs in the real-time audio thread; reads amplitude, consumes the budget
pub struct NoiseSource {
    generator: NoiseGenerator,
    parameters: Arc<NoiseParameters>,
}

impl NoiseSource {
    pub fn new(parameters: Arc<NoiseParameters>) -> Self {
        Self::with_generator(parameters, NoiseGenerator::new())
    }

    pub fn with_generator(parameters: Arc<NoiseParameters>, generator: NoiseGenerator) -> Self {
        Self {
            generator,
            parameters,
        }
    }

    /// Fill `buffer` with amplitude-scaled noise
    /// Returns the number of samples written; 0 means end of stream.
    /// Samples past the returned count are left untouched.
    pub fn fill(&mut self, buffer: &mut [f32]) -> usize {
        if self.parameters.is_stopped() {
            return 0;
        }

        let remaining = self.parameters.remaining_samples();
        let count = (buffer.len() as u64).min(remaining) as usize;
        if count == 0 {
            return 0;
        }

        let amplitude = self.parameters.amplitude();
        for sample in buffer[..count].iter_mut() {
            *sample = self.generator.next_sample() * amplitude;
        }

        self.parameters.set_remaining_samples(remaining - count as u64);
        count
    }
}
