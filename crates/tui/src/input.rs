use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use distind_core::DistanceState;

use crate::app::App;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('p') | KeyCode::Char(' ') => app.toggle_pause(),
        KeyCode::Char('t') => app.theme.next_preset(),
        KeyCode::Char('r') | KeyCode::Char('o') => app.set_state(DistanceState::Acceptable),
        KeyCode::Char('c') | KeyCode::Left => app.set_state(DistanceState::TooClose),
        KeyCode::Char('f') | KeyCode::Right => app.set_state(DistanceState::TooFar),
        KeyCode::Char('u') => app.set_state(DistanceState::Unknown),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppMode;
    use distind_config::Config;

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        handle_key(app, KeyEvent::new(code, modifiers));
    }

    #[test]
    fn quit_keys() {
        for (code, modifiers) in [
            (KeyCode::Char('q'), KeyModifiers::NONE),
            (KeyCode::Esc, KeyModifiers::NONE),
            (KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = App::new(&Config::default(), "test");
            press(&mut app, code, modifiers);
            assert!(app.should_quit, "{code:?} did not quit");
        }
    }

    #[test]
    fn manual_states() {
        let mut app = App::new(&Config::default(), "test");
        press(&mut app, KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(app.state, DistanceState::TooClose);
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(app.state, DistanceState::TooFar);
        press(&mut app, KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(app.state, DistanceState::Acceptable);
        press(&mut app, KeyCode::Char('u'), KeyModifiers::NONE);
        assert_eq!(app.state, DistanceState::Unknown);
    }

    #[test]
    fn pause_toggles() {
        let mut app = App::new(&Config::default(), "test");
        press(&mut app, KeyCode::Char('p'), KeyModifiers::NONE);
        assert_eq!(app.mode, AppMode::Paused);
        press(&mut app, KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(app.mode, AppMode::Live);
    }
}
