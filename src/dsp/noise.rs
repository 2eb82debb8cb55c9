use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Uniform white noise generator
/// Small, fast PRNG so it can run inside the audio callback
pub struct NoiseGenerator {
    rng: SmallRng,
}

impl NoiseGenerator {
    /// Create new noise generator seeded from the OS
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Create new noise generator with a fixed seed (reproducible output)
    #[cfg(test)]
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Generate next white noise sample in range [-1.0, 1.0]
    pub fn next_sample(&mut self) -> f32 {
        self.rng.random_range(-1.0..=1.0)
    }
}

impl Default for NoiseGenerator {
    fn default() -> Self {
        Self::new()
    }
}
