use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use super::error::AudioError;
use super::source::NoiseSource;

/// Initial scratch size; grown on demand if the host asks for more
const SCRATCH_FRAMES: usize = 1024;

/// List available audio output devices
pub fn list_audio_devices() -> Result<Vec<String>, AudioError> {
    let host = cpal::default_host();

    let mut devices: Vec<String> = host
        .output_devices()?
        .filter_map(|device| device_name(&device))
        .collect();

    // Some hosts do not enumerate the default device
    if let Some(default_name) = host.default_output_device().as_ref().and_then(device_name) {
        if !devices.contains(&default_name) {
            devices.push(default_name);
        }
    }

    if devices.is_empty() {
        return Err(AudioError::NoOutputDevices);
    }

    Ok(devices)
}

/// Find audio device index by name or index string
pub fn find_audio_device(devices: &[String], search: &str) -> Result<usize, AudioError> {
    if let Ok(index) = search.parse::<usize>() {
        if index < devices.len() {
            return Ok(index);
        }
        return Err(AudioError::DeviceIndexOutOfRange {
            index,
            max: devices.len().saturating_sub(1),
        });
    }

    // Case-insensitive substring match
    let search_lower = search.to_lowercase();
    devices
        .iter()
        .position(|device| device.to_lowercase().contains(&search_lower))
        .ok_or_else(|| AudioError::DeviceNotFound(search.to_string()))
}

/// Open the output device named by `selector`, or the host default
pub fn open_device(selector: Option<&str>) -> Result<cpal::Device, AudioError> {
    let host = cpal::default_host();

    let Some(selector) = selector else {
        return host.default_output_device().ok_or(AudioError::NoOutputDevices);
    };

    let devices = list_audio_devices()?;
    let wanted = &devices[find_audio_device(&devices, selector)?];

    let found = host
        .output_devices()?
        .find(|device| device_name(device).as_ref() == Some(wanted));

    found
        .or_else(|| {
            host.default_output_device()
                .filter(|device| device_name(device).as_ref() == Some(wanted))
        })
        .ok_or(AudioError::DeviceUnavailable)
}

pub fn device_name(device: &cpal::Device) -> Option<String> {
    device.description().ok().map(|desc| desc.name().to_string())
}

/// Pick a mono f32 config at `sample_rate`, else the device default
pub fn select_stream_config(
    device: &cpal::Device,
    sample_rate: u32,
) -> Result<(cpal::StreamConfig, cpal::SampleFormat), AudioError> {
    let mono = device.supported_output_configs()?.find(|range| {
        range.channels() == 1
            && range.sample_format() == cpal::SampleFormat::F32
            && range.min_sample_rate() <= sample_rate
            && sample_rate <= range.max_sample_rate()
    });

    if let Some(range) = mono {
        let supported = range.with_sample_rate(sample_rate);
        return Ok((supported.config(), supported.sample_format()));
    }

    let fallback = device.default_output_config()?;
    log::warn!(
        "{} Hz mono output not supported, using {} Hz with {} channel(s)",
        sample_rate,
        fallback.sample_rate(),
        fallback.channels()
    );
    Ok((fallback.config(), fallback.sample_format()))
}

/// Running output stream fed by a `NoiseSource`
/// Keep it alive for as long as audio should play.
pub struct AudioOutput {
    stream: cpal::Stream,
    pub sample_rate: u32,
    pub channels: u16,
}

impl AudioOutput {
    /// Build the stream for the device's sample format and start playback
    pub fn start(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        sample_format: cpal::SampleFormat,
        source: NoiseSource,
    ) -> Result<Self, AudioError> {
        let stream = match sample_format {
            cpal::SampleFormat::F32 => build_stream::<f32>(device, config, source)?,
            cpal::SampleFormat::I16 => build_stream::<i16>(device, config, source)?,
            cpal::SampleFormat::U16 => build_stream::<u16>(device, config, source)?,
            other => return Err(AudioError::UnsupportedSampleFormat(other)),
        };

        stream.play()?;
        log::info!(
            "playing at {} Hz, {} channel(s), {:?}",
            config.sample_rate,
            config.channels,
            sample_format
        );

        Ok(Self {
            stream,
            sample_rate: config.sample_rate,
            channels: config.channels,
        })
    }

    /// Pause and release the device
    pub fn stop(self) -> Result<(), AudioError> {
        self.stream.pause()?;
        Ok(())
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut source: NoiseSource,
) -> Result<cpal::Stream, AudioError>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    let channels = config.channels as usize;

    // Pre-allocate mono scratch buffer
    let mut scratch = vec![0.0f32; SCRATCH_FRAMES];

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            render_interleaved(&mut source, &mut scratch, data, channels);
        },
        |err| log::error!("Audio stream error: {}", err),
        None,
    )?;

    Ok(stream)
}

/// Pull one mono sample per frame and copy it to every channel
/// Frames the source could not fill are written as silence.
pub fn render_interleaved<T>(
    source: &mut NoiseSource,
    scratch: &mut Vec<f32>,
    data: &mut [T],
    channels: usize,
) where
    T: cpal::Sample + cpal::FromSample<f32>,
{
    let channels = channels.max(1);
    let frames = data.len() / channels;

    if scratch.len() < frames {
        scratch.resize(frames, 0.0);
    }

    let written = source.fill(&mut scratch[..frames]);

    for (i, frame) in data.chunks_mut(channels).enumerate() {
        let value = if i < written { scratch[i] } else { 0.0 };
        for sample in frame.iter_mut() {
            *sample = T::from_sample(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::parameters::NoiseParameters;
    use crate::dsp::noise::NoiseGenerator;
    use std::sync::Arc;

    fn devices() -> Vec<String> {
        vec![
            "Built-in Output".to_string(),
            "USB Audio Interface".to_string(),
            "HDMI".to_string(),
        ]
    }

    #[test]
    fn test_find_device_by_index() {
        assert_eq!(find_audio_device(&devices(), "1").unwrap(), 1);
    }

    #[test]
    fn test_find_device_index_out_of_range() {
        let err = find_audio_device(&devices(), "7").unwrap_err();
        assert!(matches!(err, AudioError::DeviceIndexOutOfRange { index: 7, max: 2 }));
    }

    #[test]
    fn test_find_device_by_name() {
        assert_eq!(find_audio_device(&devices(), "usb").unwrap(), 1);
        assert_eq!(find_audio_device(&devices(), "hdmi").unwrap(), 2);
    }

    #[test]
    fn test_find_device_not_found() {
        let err = find_audio_device(&devices(), "bluetooth").unwrap_err();
        assert_eq!(err.to_string(), "Audio device 'bluetooth' not found");
    }

    #[test]
    fn test_render_duplicates_mono_into_channels() {
        let params = Arc::new(NoiseParameters::new(0.5, 1_000));
        let mut source = NoiseSource::with_generator(params, NoiseGenerator::new_with_seed(3));
        let mut scratch = Vec::new();
        let mut data = vec![0.0f32; 16];

        render_interleaved(&mut source, &mut scratch, &mut data, 2);

        for frame in data.chunks(2) {
            assert_eq!(frame[0], frame[1]);
            assert!(frame[0].abs() <= 0.5);
        }
    }

    #[test]
    fn test_render_pads_with_silence_when_exhausted() {
        let params = Arc::new(NoiseParameters::new(0.5, 3));
        let mut source =
            NoiseSource::with_generator(params.clone(), NoiseGenerator::new_with_seed(3));
        let mut scratch = vec![0.0f32; 4];
        let mut data = vec![1.0f32; 16];

        render_interleaved(&mut source, &mut scratch, &mut data, 2);

        assert!(data[6..].iter().all(|s| *s == 0.0));
        assert!(!params.is_playing());
    }
}
