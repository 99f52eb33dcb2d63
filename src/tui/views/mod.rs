//! TUI Views module
//!
//! Contains the two pages, entry and analysis, as well as the sidebar and
//! status bar.

pub mod analysis;
pub mod entry;
pub mod sidebar;
pub mod status_bar;

use ratatui::Frame;

use super::app::{ActiveView, App};
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    sidebar::render(frame, app, layout.sidebar);

    match app.active_view {
        ActiveView::EntryPage => entry::render(frame, app, layout.main),
        ActiveView::Analysis => analysis::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);
}
