//! Keyboard input dispatch — global keys first, then panel-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Panel};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('r') => {
            app.request_refresh("manual");
            return;
        }
        KeyCode::Char('1') => {
            app.active_panel = Panel::Dashboard;
            return;
        }
        KeyCode::Char('2') => {
            app.active_panel = Panel::History;
            return;
        }
        KeyCode::Char('3') => {
            app.active_panel = Panel::Help;
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        _ => {}
    }

    // Panel-specific keys.
    match app.active_panel {
        Panel::History => handle_history_key(app, key),
        Panel::Dashboard | Panel::Help => {} // display only
    }
}

fn handle_history_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.history_cursor + 1 < app.history.len() {
                app.history_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.history_cursor = app.history_cursor.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.history_cursor = 0;
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.history_cursor = app.history.len().saturating_sub(1);
        }
        _ => {}
    }
}
