use crossterm::{
    queue,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::io::{self, Write};

use crate::types::events::ControlEvent;

/// Menu lines shown at startup
pub fn menu_lines(oscillation_enabled: bool) -> Vec<&'static str> {
    let mut lines = vec!["Use [+ & -] to change amplitude."];
    if oscillation_enabled {
        lines.push("[T]oggle oscillation");
    }
    lines.push("[E]xit");
    lines
}

pub fn format_amplitude(amplitude: f32) -> String {
    format!("Amplitude: {:.3}", amplitude)
}

/// Console line for a control event
pub fn format_event(event: &ControlEvent) -> String {
    match event {
        ControlEvent::AmplitudeChanged(amplitude) => format_amplitude(*amplitude),
        ControlEvent::OscillationStarted { midpoint } => {
            format!("Oscillation on (midpoint {:.3})", midpoint)
        }
        ControlEvent::OscillationStopped => "Oscillation off".to_string(),
    }
}

/// Raw-mode terminal for the lifetime of the session
/// Keys are read without echo; restored on drop, including error paths.
pub struct ConsoleSession {
    stdout: io::Stdout,
}

impl ConsoleSession {
    pub fn start() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self {
            stdout: io::stdout(),
        })
    }

    /// Print one line; raw mode needs an explicit carriage return
    pub fn print_line(&mut self, line: &str) -> io::Result<()> {
        queue!(self.stdout, Print(line), Print("\r\n"))?;
        self.stdout.flush()
    }

    pub fn print_menu(&mut self, oscillation_enabled: bool) -> io::Result<()> {
        for line in menu_lines(oscillation_enabled) {
            self.print_line(line)?;
        }
        Ok(())
    }

    pub fn print_event(&mut self, event: &ControlEvent) -> io::Result<()> {
        self.print_line(&format_event(event))
    }
}

impl Drop for ConsoleSession {
    fn drop(&mut self) {
        if let Err(err) = disable_raw_mode() {
            log::error!("Failed to restore terminal: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_with_oscillation() {
        assert_eq!(
            menu_lines(true),
            vec!["Use [+ & -] to change amplitude.", "[T]oggle oscillation", "[E]xit"]
        );
    }

    #[test]
    fn test_menu_without_oscillation() {
        assert_eq!(menu_lines(false), vec!["Use [+ & -] to change amplitude.", "[E]xit"]);
    }

    #[test]
    fn test_format_amplitude() {
        assert_eq!(format_amplitude(0.1 + 0.03), "Amplitude: 0.130");
        assert_eq!(format_amplitude(0.0), "Amplitude: 0.000");
    }

    #[test]
    fn test_format_events() {
        assert_eq!(format_event(&ControlEvent::AmplitudeChanged(0.25)), "Amplitude: 0.250");
        assert_eq!(
            format_event(&ControlEvent::OscillationStarted { midpoint: 0.1 }),
            "Oscillation on (midpoint 0.100)"
        );
        assert_eq!(format_event(&ControlEvent::OscillationStopped), "Oscillation off");
    }
}
