//! Keyboard and mouse input handling.
//!
//! Maps terminal events to [`App`] actions. Adding a new keybinding is a
//! single match arm in [`handle_key_event`].
//!
//! ## For contributors
//!
//! To add a new keybinding:
//!
//! 1. Add a method on [`App`] for the action (if one doesn't exist).
//! 2. Add a `KeyCode` match arm in [`handle_key_event`] that calls it.
//! 3. Update the help text in the status bar (`ui::draw_status_bar`).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::App;

/// Lines moved per mouse-wheel notch.
const WHEEL_STEP: i64 = 1;

/// Process a single key event, updating app state accordingly.
///
/// Only reacts to key-press events (ignoring release / repeat) so that each
/// physical keypress triggers exactly one action.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.scroll_rows(1),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_rows(-1),
        KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_pages(1),
        KeyCode::PageUp => app.scroll_pages(-1),
        KeyCode::Home | KeyCode::Char('g') => app.scroll_to_top(),
        KeyCode::End | KeyCode::Char('G') => app.scroll_to_bottom(),
        KeyCode::Char('r') => app.reload(),
        _ => {}
    }
}

/// Scroll on mouse-wheel events; everything else is ignored.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => app.scroll_by(WHEEL_STEP),
        MouseEventKind::ScrollUp => app.scroll_by(-WHEEL_STEP),
        _ => {}
    }
}
