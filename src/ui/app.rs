use std::sync::Arc;

use crossbeam_channel::Sender;

use crate::audio::parameters::NoiseParameters;
use crate::modulation::OscillationController;
use crate::types::events::ControlEvent;

/// Console application state
/// Owns the oscillation controller and reports every change as a `ControlEvent`
pub struct App {
    /// Reference to shared parameters
    pub parameters: Arc<NoiseParameters>,
    /// None when the oscillation toggle is disabled
    oscillation: Option<OscillationController>,
    events: Sender<ControlEvent>,
    /// Whether to quit the application
    pub should_quit: bool,
}

impl App {
    pub fn new(
        parameters: Arc<NoiseParameters>,
        oscillation: Option<OscillationController>,
        events: Sender<ControlEvent>,
    ) -> Self {
        Self {
            parameters,
            oscillation,
            events,
            should_quit: false,
        }
    }

    pub fn oscillation_enabled(&self) -> bool {
        self.oscillation.is_some()
    }

    pub fn oscillation_running(&self) -> bool {
        self.oscillation
            .as_ref()
            .is_some_and(OscillationController::is_running)
    }

    pub fn increase_amplitude(&mut self) {
        let amplitude = self.parameters.increase_amplitude();
        let _ = self.events.send(ControlEvent::AmplitudeChanged(amplitude));
    }

    pub fn decrease_amplitude(&mut self) {
        let amplitude = self.parameters.decrease_amplitude();
        let _ = self.events.send(ControlEvent::AmplitudeChanged(amplitude));
    }

    /// Start or stop the oscillation; ignored when disabled
    pub fn toggle_oscillation(&mut self) {
        if let Some(oscillation) = self.oscillation.as_mut() {
            oscillation.toggle();
        }
    }

    /// Stop the oscillation, then playback, and leave the loop
    pub fn quit(&mut self) {
        if let Some(oscillation) = self.oscillation.as_mut() {
            oscillation.stop();
        }
        self.parameters.stop();
        self.should_quit = true;
    }

    /// True once the user quit or the sample budget ran out
    pub fn is_finished(&self) -> bool {
        self.should_quit || !self.parameters.is_playing()
    }
}
