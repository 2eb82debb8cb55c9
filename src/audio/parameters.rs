use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

/// Amount a single key press moves the amplitude
pub const AMPLITUDE_STEP: f32 = 0.01;

/// Shared playback state
/// Owned through an `Arc` by the audio callback, the input loop and the
/// oscillation worker. Everything is atomic so the audio thread never blocks.
pub struct NoiseParameters {
    /// Multiplier applied to every noise sample
    pub amplitude: AtomicF32,
    /// Frames left before playback ends on its own
    remaining_samples: AtomicU64,
    /// Set once playback has been stopped explicitly
    stopped: AtomicBool,
}

impl NoiseParameters {
    pub fn new(amplitude: f32, total_samples: u64) -> Self {
        Self {
            amplitude: AtomicF32::new(amplitude),
            remaining_samples: AtomicU64::new(total_samples),
            stopped: AtomicBool::new(false),
        }
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude.load(Ordering::Relaxed)
    }

    pub fn set_amplitude(&self, amplitude: f32) {
        self.amplitude.store(amplitude, Ordering::Relaxed);
    }

    /// Raise amplitude by one step (no upper bound), returns the new value
    pub fn increase_amplitude(&self) -> f32 {
        self.amplitude.update(|a| a + AMPLITUDE_STEP)
    }

    /// Lower amplitude by one step, clamped at zero, returns the new value
    pub fn decrease_amplitude(&self) -> f32 {
        self.amplitude.update(|a| (a - AMPLITUDE_STEP).max(0.0))
    }

    pub fn remaining_samples(&self) -> u64 {
        self.remaining_samples.load(Ordering::Relaxed)
    }

    /// Only the audio callback consumes the budget, so a plain store is enough
    pub(crate) fn set_remaining_samples(&self, remaining: u64) {
        self.remaining_samples.store(remaining, Ordering::Relaxed);
    }

    /// Stop playback; the source returns no more samples afterwards
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// True until the budget runs out or playback is stopped
    pub fn is_playing(&self) -> bool {
        !self.is_stopped() && self.remaining_samples() > 0
    }
}

/// Atomic f32 wrapper for lock-free parameter updates
pub struct AtomicF32 {
    storage: AtomicU32,
}

impl AtomicF32 {
    pub fn new(value: f32) -> Self {
        Self {
            storage: AtomicU32::new(value.to_bits()),
        }
    }

    pub fn load(&self, ordering: Ordering) -> f32 {
        f32::from_bits(self.storage.load(ordering))
    }

    pub fn store(&self, value: f32, ordering: Ordering) {
        self.storage.store(value.to_bits(), ordering);
    }

    /// Atomically apply `f` and return the value it produced
    pub fn update(&self, f: impl Fn(f32) -> f32) -> f32 {
        let mut current = self.storage.load(Ordering::Relaxed);
        loop {
            let next = f(f32::from_bits(current)).to_bits();
            match self.storage.compare_exchange_weak(
                current,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return f32::from_bits(next),
                Err(actual) => current = actual,
            }
        }
    }
}
