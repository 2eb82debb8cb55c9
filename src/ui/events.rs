use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use super::app::App;

/// Interactive command bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    IncreaseAmplitude,
    DecreaseAmplitude,
    ToggleOscillation,
    Exit,
}

impl Command {
    /// Map a key press to a command; unknown keys map to None
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        // Check for Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c')) {
            return Some(Command::Exit);
        }

        match key.code {
            // '=' shares the key with '+' on most layouts
            KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::IncreaseAmplitude),
            KeyCode::Char('-') | KeyCode::Char('_') => Some(Command::DecreaseAmplitude),
            KeyCode::Char('t') | KeyCode::Char('T') => Some(Command::ToggleOscillation),
            KeyCode::Char('e') | KeyCode::Char('E') => Some(Command::Exit),
            _ => None,
        }
    }
}

/// Handle keyboard events and update app state
pub fn handle_events(app: &mut App, timeout: Duration) -> anyhow::Result<()> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            handle_key_event(app, key);
        }
    }
    Ok(())
}

/// Process individual key press
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    match Command::from_key(key) {
        Some(Command::IncreaseAmplitude) => app.increase_amplitude(),
        Some(Command::DecreaseAmplitude) => app.decrease_amplitude(),
        Some(Command::ToggleOscillation) => app.toggle_oscillation(),
        Some(Command::Exit) => app.quit(),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use std::sync::Arc;

    use crate::audio::parameters::NoiseParameters;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Command::from_key(press(KeyCode::Char('+'))), Some(Command::IncreaseAmplitude));
        assert_eq!(Command::from_key(press(KeyCode::Char('='))), Some(Command::IncreaseAmplitude));
        assert_eq!(Command::from_key(press(KeyCode::Char('-'))), Some(Command::DecreaseAmplitude));
        assert_eq!(Command::from_key(press(KeyCode::Char('T'))), Some(Command::ToggleOscillation));
        assert_eq!(Command::from_key(press(KeyCode::Char('t'))), Some(Command::ToggleOscillation));
        assert_eq!(Command::from_key(press(KeyCode::Char('E'))), Some(Command::Exit));
        assert_eq!(Command::from_key(press(KeyCode::Char('e'))), Some(Command::Exit));
    }

    #[test]
    fn test_ctrl_c_exits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Command::from_key(key), Some(Command::Exit));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        assert_eq!(Command::from_key(press(KeyCode::Char('x'))), None);
        assert_eq!(Command::from_key(press(KeyCode::Char('c'))), None);
        assert_eq!(Command::from_key(press(KeyCode::Enter)), None);
    }

    #[test]
    fn test_release_events_ignored() {
        let key = KeyEvent {
            code: KeyCode::Char('+'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(Command::from_key(key), None);
    }

    #[test]
    fn test_dispatch_updates_app() {
        let params = Arc::new(NoiseParameters::new(0.1, 1_000));
        let (tx, _rx) = crossbeam_channel::unbounded();
        let mut app = App::new(params.clone(), None, tx);

        for _ in 0..3 {
            handle_key_event(&mut app, press(KeyCode::Char('+')));
        }
        assert!((params.amplitude() - 0.13).abs() < 1e-5);

        for _ in 0..15 {
            handle_key_event(&mut app, press(KeyCode::Char('-')));
        }
        assert_eq!(params.amplitude(), 0.0);

        handle_key_event(&mut app, press(KeyCode::Char('q')));
        assert!(!app.should_quit);

        handle_key_event(&mut app, press(KeyCode::Char('E')));
        assert!(app.should_quit);
        assert!(params.is_stopped());
    }
}
