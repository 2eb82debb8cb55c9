use thiserror::Error;

/// Failures while opening the audio output
/// All of these are fatal for the application
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("No audio output devices found")]
    NoOutputDevices,

    #[error("Audio device index {index} out of range (0-{max})")]
    DeviceIndexOutOfRange { index: usize, max: usize },

    #[error("Audio device '{0}' not found")]
    DeviceNotFound(String),

    #[error("Selected audio device not available")]
    DeviceUnavailable,

    #[error("Unsupported sample format: {0:?}")]
    UnsupportedSampleFormat(cpal::SampleFormat),

    #[error(transparent)]
    Devices(#[from] cpal::DevicesError),

    #[error(transparent)]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error(transparent)]
    SupportedConfigs(#[from] cpal::SupportedStreamConfigsError),

    #[error(transparent)]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error(transparent)]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error(transparent)]
    PauseStream(#[from] cpal::PauseStreamError),
}
