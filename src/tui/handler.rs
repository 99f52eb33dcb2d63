//! Event handler for the TUI
//!
//! Routes keyboard events to the appropriate handlers
//! based on the current application state.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{ActiveView, App, FocusedPanel};
use super::event::Event;
use super::views::{analysis, entry};

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(_) | Event::Tick | Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind == KeyEventKind::Release {
        return Ok(());
    }

    // Ctrl+C quits from anywhere, including text fields
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return Ok(());
    }

    if !app.is_editing_text() {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                app.quit();
                return Ok(());
            }
            KeyCode::Char('1') => {
                open_view(app, ActiveView::EntryPage);
                return Ok(());
            }
            KeyCode::Char('2') => {
                open_view(app, ActiveView::Analysis);
                return Ok(());
            }
            _ => {}
        }
    }

    match app.focused_panel {
        FocusedPanel::Sidebar => handle_sidebar_key(app, key),
        FocusedPanel::Main => handle_main_panel_key(app, key),
    }

    Ok(())
}

/// Switch page and hand focus to it
fn open_view(app: &mut App, view: ActiveView) {
    app.clear_status();
    app.switch_view(view);
    app.focused_panel = FocusedPanel::Main;
}

/// Handle keys when sidebar is focused
fn handle_sidebar_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.clear_status();
            app.step_view(true);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.clear_status();
            app.step_view(false);
        }
        KeyCode::Enter | KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right => {
            app.toggle_panel_focus();
        }
        _ => {}
    }
}

/// Handle keys when main panel is focused
fn handle_main_panel_key(app: &mut App, key: KeyEvent) {
    match app.active_view {
        ActiveView::EntryPage => {
            entry::handle_key(app, key);
        }
        ActiveView::Analysis => {
            analysis::handle_key(app, key);
        }
    }
}
