mod audio;
mod config;
mod dsp;
mod modulation;
mod types;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::Receiver;
use std::{sync::Arc, time::Duration};

use audio::output::{self, AudioOutput};
use audio::parameters::NoiseParameters;
use audio::source::NoiseSource;
use config::{PlaybackSettings, DEFAULT_AMPLITUDE, DEFAULT_DURATION_SECS, DEFAULT_SAMPLE_RATE};
use modulation::OscillationController;
use types::events::ControlEvent;
use ui::{app::App, console::ConsoleSession, events};

/// How long the input loop waits for a key before checking playback state
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Interactive white noise player
#[derive(Parser, Debug)]
#[command(name = "whitenoise")]
#[command(about = "Plays white noise with keyboard amplitude control", long_about = None)]
struct Args {
    /// List available audio output devices and exit
    #[arg(short = 'l', long = "list")]
    list_devices: bool,

    /// Output device (name or index from --list)
    #[arg(short = 'd', long = "device")]
    device: Option<String>,

    /// Requested sample rate in Hz
    #[arg(short = 'r', long = "sample-rate", default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    /// Playback length in seconds
    #[arg(short = 't', long = "duration", default_value_t = DEFAULT_DURATION_SECS)]
    duration: u64,

    /// Initial amplitude
    #[arg(short = 'a', long = "amplitude", default_value_t = DEFAULT_AMPLITUDE)]
    amplitude: f32,

    /// Disable the oscillation toggle
    #[arg(long = "steady")]
    steady: bool,
}

impl Args {
    fn settings(&self) -> PlaybackSettings {
        PlaybackSettings {
            sample_rate: self.sample_rate,
            duration_secs: self.duration,
            initial_amplitude: self.amplitude,
            oscillation: !self.steady,
            device: self.device.clone(),
        }
    }
}

fn setup_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

fn main() -> Result<()> {
    setup_logging();
    let args = Args::parse();

    if args.list_devices {
        println!("Available Audio Output Devices:");
        for (i, device) in output::list_audio_devices()?.iter().enumerate() {
            println!("  {}: {}", i, device);
        }
        return Ok(());
    }

    let settings = args.settings();
    settings.validate().context("Invalid playback settings")?;
    run(&settings)
}

/// Open the device, start the noise stream and run the input loop
fn run(settings: &PlaybackSettings) -> Result<()> {
    let device = output::open_device(settings.device.as_deref())
        .context("Failed to open audio output device")?;
    if let Some(name) = output::device_name(&device) {
        log::info!("using output device '{}'", name);
    }

    let (stream_config, sample_format) =
        output::select_stream_config(&device, settings.sample_rate)?;
    let parameters = Arc::new(NoiseParameters::new(
        settings.initial_amplitude,
        settings.total_samples(stream_config.sample_rate),
    ));

    let audio = AudioOutput::start(
        &device,
        &stream_config,
        sample_format,
        NoiseSource::new(parameters.clone()),
    )
    .context("Failed to start audio stream")?;
    log::info!("stream running: {} Hz, {} channel(s)", audio.sample_rate, audio.channels);

    let (event_tx, event_rx) = crossbeam_channel::unbounded();
    let oscillation = settings
        .oscillation
        .then(|| OscillationController::new(parameters.clone(), event_tx.clone()));
    let mut app = App::new(parameters, oscillation, event_tx);

    let mut console = ConsoleSession::start().context("Failed to enter raw mode")?;
    console.print_menu(app.oscillation_enabled())?;

    run_input_loop(&mut console, &mut app, &event_rx)?;
    let budget_exhausted = !app.should_quit;

    // Oscillation first, then playback
    app.quit();
    print_pending(&mut console, &event_rx)?;
    if budget_exhausted {
        console.print_line("Playback finished.")?;
    }
    drop(console);

    audio.stop()?;
    Ok(())
}

fn run_input_loop(
    console: &mut ConsoleSession,
    app: &mut App,
    event_rx: &Receiver<ControlEvent>,
) -> Result<()> {
    while !app.is_finished() {
        events::handle_events(app, INPUT_POLL)?;
        print_pending(console, event_rx)?;
    }
    Ok(())
}

/// Print every event queued by the input handlers and the oscillation worker
fn print_pending(console: &mut ConsoleSession, event_rx: &Receiver<ControlEvent>) -> Result<()> {
    while let Ok(event) = event_rx.try_recv() {
        console.print_event(&event)?;
    }
    Ok(())
}
