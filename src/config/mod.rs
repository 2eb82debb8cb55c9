use anyhow::{anyhow, Result};

/// 96 kHz output
pub const DEFAULT_SAMPLE_RATE: u32 = 96_000;
/// One hour of noise
pub const DEFAULT_DURATION_SECS: u64 = 60 * 60;
pub const DEFAULT_AMPLITUDE: f32 = 0.1;

/// Playback settings, built from the command line
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSettings {
    /// Requested sample rate in Hz
    pub sample_rate: u32,
    /// Playback length in seconds
    pub duration_secs: u64,
    /// Amplitude at startup
    pub initial_amplitude: f32,
    /// Whether the [T]oggle oscillation key is available
    pub oscillation: bool,
    /// Output device name or index (None = host default)
    pub device: Option<String>,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            duration_secs: DEFAULT_DURATION_SECS,
            initial_amplitude: DEFAULT_AMPLITUDE,
            oscillation: true,
            device: None,
        }
    }
}

impl PlaybackSettings {
    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(anyhow!("Sample rate must be greater than 0 Hz"));
        }
        if self.duration_secs == 0 {
            return Err(anyhow!("Duration must be at least 1 second"));
        }
        if (self.sample_rate as u64).checked_mul(self.duration_secs).is_none() {
            return Err(anyhow!(
                "Duration of {} seconds at {} Hz is too long",
                self.duration_secs,
                self.sample_rate
            ));
        }
        if !self.initial_amplitude.is_finite() || self.initial_amplitude < 0.0 {
            return Err(anyhow!("Amplitude must be a finite value >= 0.0"));
        }

        Ok(())
    }

    /// Sample budget for the given (actual) output rate
    /// The device may run faster than requested, so this saturates.
    pub fn total_samples(&self, sample_rate: u32) -> u64 {
        (sample_rate as u64).saturating_mul(self.duration_secs)
    }
}
