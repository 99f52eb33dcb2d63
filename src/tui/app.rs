//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.

use tracing::warn;

use crate::config::Settings;
use crate::models::Expense;
use crate::storage::Storage;

use super::views::analysis::AnalysisState;
use super::views::entry::EntryFormState;

/// Which page is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    EntryPage,
    Analysis,
}

impl ActiveView {
    /// Pages in sidebar order
    pub const ALL: [ActiveView; 2] = [Self::EntryPage, Self::Analysis];

    pub fn title(&self) -> &'static str {
        match self {
            Self::EntryPage => "Entry Page",
            Self::Analysis => "Analysis",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|v| v == self).unwrap_or(0)
    }
}

/// Which panel currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPanel {
    #[default]
    Sidebar,
    Main,
}

/// Main application state
pub struct App<'a> {
    /// The storage layer
    pub storage: &'a Storage,

    /// Application settings
    pub settings: &'a Settings,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Currently active page
    pub active_view: ActiveView,

    /// Which panel is focused
    pub focused_panel: FocusedPanel,

    /// Entry form state
    pub entry_form: EntryFormState,

    /// Analysis filter state
    pub analysis: AnalysisState,

    /// Records loaded for the analysis page
    pub records: Vec<Expense>,

    /// Why the last load came back empty, if it failed
    pub load_error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,
}

impl<'a> App<'a> {
    /// Create a new App instance
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self {
            storage,
            settings,
            should_quit: false,
            active_view: ActiveView::default(),
            focused_panel: FocusedPanel::default(),
            entry_form: EntryFormState::new(),
            analysis: AnalysisState::default(),
            records: Vec::new(),
            load_error: None,
            status_message: None,
        }
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Switch to a different page
    ///
    /// Opening the analysis page reads the data file again.
    pub fn switch_view(&mut self, view: ActiveView) {
        self.active_view = view;
        if view == ActiveView::Analysis {
            self.reload_records();
        }
    }

    /// Move the page selection up or down the sidebar
    pub fn step_view(&mut self, down: bool) {
        let index = self.active_view.index();
        let next = if down {
            (index + 1).min(ActiveView::ALL.len() - 1)
        } else {
            index.saturating_sub(1)
        };
        if next != index {
            self.switch_view(ActiveView::ALL[next]);
        }
    }

    /// Toggle focus between sidebar and main panel
    pub fn toggle_panel_focus(&mut self) {
        self.focused_panel = match self.focused_panel {
            FocusedPanel::Sidebar => FocusedPanel::Main,
            FocusedPanel::Main => FocusedPanel::Sidebar,
        };
    }

    /// Read all records and reset the analysis filters to match them
    pub fn reload_records(&mut self) {
        match self.storage.expenses.load() {
            Ok(records) => {
                self.records = records;
                self.load_error = None;
            }
            Err(e) => {
                warn!("falling back to an empty record set: {}", e);
                self.records.clear();
                self.load_error = Some(format!("Error fetching data: {}", e));
            }
        }
        self.analysis.reset(&self.records);
    }

    /// Whether typed characters go to a text field rather than shortcuts
    pub fn is_editing_text(&self) -> bool {
        self.focused_panel == FocusedPanel::Main
            && self.active_view == ActiveView::EntryPage
            && self.entry_form.focused_field.is_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackerPaths;
    use crate::models::{ExpenseType, Money, PaymentMethod};
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, Settings) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(TrackerPaths::with_base_dir(temp_dir.path().into())).unwrap();
        (temp_dir, storage, Settings::default())
    }

    #[test]
    fn test_switch_to_analysis_loads_records() {
        let (_temp, storage, settings) = setup();
        storage
            .expenses
            .append(&Expense::new(
                ExpenseType::Travel,
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                NaiveTime::from_hms_opt(8, 15, 0).unwrap(),
                "bus",
                "Ishwarya",
                PaymentMethod::Phonepay,
                Money::from_units(25),
            ))
            .unwrap();

        let mut app = App::new(&storage, &settings);
        assert!(app.records.is_empty());

        app.switch_view(ActiveView::Analysis);
        assert_eq!(app.records.len(), 1);
        assert!(app.analysis.filter.types.contains(&ExpenseType::Travel));
        assert!(app.load_error.is_none());
    }

    #[test]
    fn test_corrupt_file_sets_load_error() {
        let (_temp, storage, settings) = setup();
        std::fs::write(storage.expenses.path(), "Type,Date\nGrocery,2024-01-05\n").unwrap();

        let mut app = App::new(&storage, &settings);
        app.switch_view(ActiveView::Analysis);

        assert!(app.records.is_empty());
        assert!(app
            .load_error
            .as_deref()
            .unwrap()
            .starts_with("Error fetching data"));
    }

    #[test]
    fn test_step_view_stays_in_bounds() {
        let (_temp, storage, settings) = setup();
        let mut app = App::new(&storage, &settings);

        app.step_view(false);
        assert_eq!(app.active_view, ActiveView::EntryPage);
        app.step_view(true);
        assert_eq!(app.active_view, ActiveView::Analysis);
        app.step_view(true);
        assert_eq!(app.active_view, ActiveView::Analysis);
    }
}
