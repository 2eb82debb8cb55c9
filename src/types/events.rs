/// Events sent from the input handlers and the oscillation worker to the console
/// Must be cheap to construct; senders never block
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// Amplitude was changed to the given value
    AmplitudeChanged(f32),
    /// Oscillation started around the given midpoint
    OscillationStarted { midpoint: f32 },
    /// Oscillation worker exited
    OscillationStopped,
}

impl ControlEvent {
    /// New amplitude carried by this event, if any
    #[cfg(test)]
    pub fn amplitude(&self) -> Option<f32> {
        match self {
            ControlEvent::AmplitudeChanged(amplitude) => Some(*amplitude),
            ControlEvent::OscillationStarted { .. } | ControlEvent::OscillationStopped => None,
        }
    }
}
