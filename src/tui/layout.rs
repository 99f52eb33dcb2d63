//! Layout definitions for the TUI
//!
//! Defines the overall layout structure: sidebar, main panel, status bar.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout regions for the TUI
pub struct AppLayout {
    /// Sidebar area (page switcher)
    pub sidebar: Rect,
    /// Main content area
    pub main: Rect,
    /// Status bar at the bottom
    pub status_bar: Rect,
}

impl AppLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Main area
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(24), // Sidebar (fixed width)
                Constraint::Min(40),    // Main content
            ])
            .split(vertical[0]);

        Self {
            sidebar: horizontal[0],
            main: horizontal[1],
            status_bar: vertical[1],
        }
    }
}

/// Layout for the sidebar
pub struct SidebarLayout {
    /// Title/header area
    pub header: Rect,
    /// Page switcher
    pub pages: Rect,
    /// Data file summary
    pub summary: Rect,
}

impl SidebarLayout {
    /// Calculate sidebar layout
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(4), // Pages
                Constraint::Min(3),    // Summary
            ])
            .split(area);

        Self {
            header: chunks[0],
            pages: chunks[1],
            summary: chunks[2],
        }
    }
}

/// Layout for the analysis view
pub struct AnalysisLayout {
    /// Filter panel
    pub filters: Rect,
    /// Total expense line
    pub total: Rect,
    /// Matching entries
    pub table: Rect,
    /// Bar chart by type
    pub by_type: Rect,
    /// Percentage breakdown by type
    pub shares: Rect,
    /// Bar chart by date
    pub by_date: Rect,
}

impl AnalysisLayout {
    /// Calculate analysis view layout
    pub fn new(area: Rect) -> Self {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(28), // Filters
                Constraint::Min(30),    // Report
            ])
            .split(area);

        let report = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),       // Total
                Constraint::Percentage(35),  // Table
                Constraint::Percentage(30),  // By type
                Constraint::Min(6),          // By date
            ])
            .split(columns[1]);

        let by_type = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(report[2]);

        Self {
            filters: columns[0],
            total: report[0],
            table: report[1],
            by_type: by_type[0],
            shares: by_type[1],
            by_date: report[3],
        }
    }
}
