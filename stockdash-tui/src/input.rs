//! Keyboard input dispatch: overlays, then global keys, then panel keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use stockdash_core::{PanelKind, Ticker};

use crate::app::{App, Overlay};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    if app.overlay == Overlay::Help {
        app.overlay = Overlay::None;
        return;
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Char(c @ '1'..='4') => {
            if let Some(panel) = c.to_digit(10).and_then(|d| PanelKind::from_index(d as usize - 1)) {
                app.focus = panel;
            }
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.focus = app.focus.prev();
            } else {
                app.focus = app.focus.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return;
        }
        KeyCode::Char('a') => {
            app.toggle(Ticker::Amd);
            return;
        }
        KeyCode::Char('i') => {
            app.toggle(Ticker::Intel);
            return;
        }
        KeyCode::Char('n') => {
            app.toggle(Ticker::Nvidia);
            return;
        }
        KeyCode::Enter => {
            app.refresh();
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    if app.focus == PanelKind::Overview {
        handle_overview_key(app, key);
    }
}

fn handle_overview_key(app: &mut App, key: KeyEvent) {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Char('b') => app.begin_brush(),
        KeyCode::Left if shift => app.resize_brush(-1.0),
        KeyCode::Right if shift => app.resize_brush(1.0),
        KeyCode::Char('H') => app.resize_brush(-1.0),
        KeyCode::Char('L') => app.resize_brush(1.0),
        KeyCode::Left | KeyCode::Char('h') => app.move_brush(-1.0),
        KeyCode::Right | KeyCode::Char('l') => app.move_brush(1.0),
        KeyCode::Char('x') => app.clear_brush(),
        KeyCode::Char('r') => app.reset_domain(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockdash_core::data::sample::demo_dataset;
    use stockdash_core::{Dashboard, DashboardConfig};

    fn app() -> App {
        let config = DashboardConfig::default();
        let ds = demo_dataset(5, &config.split_dates, config.model_era_start);
        App::new(Dashboard::new(config, ds).unwrap())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn quit_and_focus_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.focus, PanelKind::Model);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, PanelKind::Scatter);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, PanelKind::Model);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn help_overlay_swallows_next_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.overlay, Overlay::Help);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.running);
    }

    #[test]
    fn brush_keys_only_on_overview() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('b'));
        assert!(app.brush.is_none());

        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('b'));
        let first = app.brush.unwrap();
        press(&mut app, KeyCode::Char('l'));
        let moved = app.brush.unwrap();
        assert!(moved.start > first.start);
        handle_key(&mut app, KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT));
        let grown = app.brush.unwrap();
        assert!(grown.end - grown.start > moved.end - moved.start);
        press(&mut app, KeyCode::Char('x'));
        assert!(app.brush.is_none());
    }

    #[test]
    fn reset_restores_full_extent() {
        let mut app = app();
        press(&mut app, KeyCode::Char('b'));
        assert_ne!(app.dashboard.domain(), app.dashboard.dataset().extent());
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.dashboard.domain(), app.dashboard.dataset().extent());
    }

    #[test]
    fn toggle_then_enter_commits_model_selection() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.dashboard.state().model_selection.len(), 3);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.dashboard.state().model_selection.len(), 2);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = app();
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        handle_key(&mut app, key);
        assert!(app.running);
    }
}
