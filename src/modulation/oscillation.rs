use std::f32::consts::PI;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::Sender;

use crate::audio::parameters::NoiseParameters;
use crate::types::events::ControlEvent;

/// Distance the amplitude swings away from the midpoint
pub const OSCILLATION_RANGE: f32 = 0.3;
/// Cycles per sweep
pub const OSCILLATION_FREQUENCY: f32 = 0.5;
/// Phase steps in one sweep (degrees)
pub const PHASE_STEPS: u32 = 360;
/// Time between amplitude updates
pub const TICK_INTERVAL: Duration = Duration::from_millis(10);

/// Sine sweep around a fixed midpoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub midpoint: f32,
    pub range: f32,
    pub frequency: f32,
}

impl Sweep {
    pub fn new(midpoint: f32, settings: &OscillationSettings) -> Self {
        Self {
            midpoint,
            range: settings.range,
            frequency: settings.frequency,
        }
    }

    /// Amplitude at `phase` degrees into the sweep
    pub fn amplitude_at(&self, phase: u32) -> f32 {
        let angle = 2.0 * PI * self.frequency * phase as f32 / PHASE_STEPS as f32;
        self.midpoint + self.range * angle.sin()
    }
}

/// Tunables for the oscillation worker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillationSettings {
    pub range: f32,
    pub frequency: f32,
    pub tick: Duration,
}

impl Default for OscillationSettings {
    fn default() -> Self {
        Self {
            range: OSCILLATION_RANGE,
            frequency: OSCILLATION_FREQUENCY,
            tick: TICK_INTERVAL,
        }
    }
}

enum OscillationState {
    Idle,
    Running {
        cancel: Arc<AtomicBool>,
        worker: JoinHandle<()>,
        midpoint: f32,
    },
}

/// Drives the amplitude as a sine wave from a background thread
/// Cancellation is cooperative: the worker checks its flag at every tick
/// boundary, and `stop()` unparks it so it never waits out a full tick.
pub struct OscillationController {
    parameters: Arc<NoiseParameters>,
    events: Sender<ControlEvent>,
    settings: OscillationSettings,
    state: OscillationState,
}

impl OscillationController {
    pub fn new(parameters: Arc<NoiseParameters>, events: Sender<ControlEvent>) -> Self {
        Self::with_settings(parameters, events, OscillationSettings::default())
    }

    pub fn with_settings(
        parameters: Arc<NoiseParameters>,
        events: Sender<ControlEvent>,
        settings: OscillationSettings,
    ) -> Self {
        Self {
            parameters,
            events,
            settings,
            state: OscillationState::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, OscillationState::Running { .. })
    }

    /// Midpoint of the active sweep
    #[cfg(test)]
    pub fn midpoint(&self) -> Option<f32> {
        match &self.state {
            OscillationState::Running { midpoint, .. } => Some(*midpoint),
            OscillationState::Idle => None,
        }
    }

    /// Start oscillating around the current amplitude; no-op if already running
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        let sweep = Sweep::new(self.parameters.amplitude(), &self.settings);
        log::debug!("oscillation started around {}", sweep.midpoint);
        let _ = self.events.send(ControlEvent::OscillationStarted {
            midpoint: sweep.midpoint,
        });

        let cancel = Arc::new(AtomicBool::new(false));
        let worker = {
            let cancel = cancel.clone();
            let parameters = self.parameters.clone();
            let events = self.events.clone();
            let tick = self.settings.tick;
            thread::spawn(move || run_sweeps(sweep, tick, &parameters, &events, &cancel))
        };

        self.state = OscillationState::Running {
            cancel,
            worker,
            midpoint: sweep.midpoint,
        };
    }

    /// Cancel the worker and wait for it to exit; no-op when idle
    pub fn stop(&mut self) {
        let state = std::mem::replace(&mut self.state, OscillationState::Idle);
        if let OscillationState::Running {
            cancel,
            worker,
            midpoint,
        } = state
        {
            cancel.store(true, Ordering::Relaxed);
            worker.thread().unpark();
            if worker.join().is_err() {
                log::error!("oscillation worker panicked");
            }
            log::debug!("oscillation around {} stopped", midpoint);
            let _ = self.events.send(ControlEvent::OscillationStopped);
        }
    }

    pub fn toggle(&mut self) {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }
}

impl Drop for OscillationController {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Worker loop: sweep the phase 0..PHASE_STEPS forever until cancelled
fn run_sweeps(
    sweep: Sweep,
    tick: Duration,
    parameters: &NoiseParameters,
    events: &Sender<ControlEvent>,
    cancel: &AtomicBool,
) {
    loop {
        for phase in 0..PHASE_STEPS {
            if cancel.load(Ordering::Relaxed) {
                return;
            }

            let amplitude = sweep.amplitude_at(phase);
            parameters.set_amplitude(amplitude);
            let _ = events.send(ControlEvent::AmplitudeChanged(amplitude));

            // Woken early by stop()
            thread::park_timeout(tick);
        }
    }
}
