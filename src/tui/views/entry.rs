//! Entry page
//!
//! The expense entry form: choice fields cycle with Left/Right, text fields
//! take typed input, Enter saves.

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::config::Settings;
use crate::display::format_expense_saved;
use crate::models::{ExpenseType, Money, PaymentMethod};
use crate::services::{EntryInput, EntryService};
use crate::tui::app::{App, FocusedPanel};
use crate::tui::widgets::input::TextInput;

const LABEL_WIDTH: usize = 16;

/// Which field is currently focused in the entry form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryField {
    #[default]
    Type,
    Date,
    Hour,
    Minute,
    EnteredBy,
    Details,
    Method,
    Amount,
}

impl EntryField {
    /// Get the next field (for Tab navigation)
    pub fn next(self) -> Self {
        match self {
            Self::Type => Self::Date,
            Self::Date => Self::Hour,
            Self::Hour => Self::Minute,
            Self::Minute => Self::EnteredBy,
            Self::EnteredBy => Self::Details,
            Self::Details => Self::Method,
            Self::Method => Self::Amount,
            Self::Amount => Self::Type,
        }
    }

    /// Get the previous field (for Shift+Tab navigation)
    pub fn prev(self) -> Self {
        match self {
            Self::Type => Self::Amount,
            Self::Date => Self::Type,
            Self::Hour => Self::Date,
            Self::Minute => Self::Hour,
            Self::EnteredBy => Self::Minute,
            Self::Details => Self::EnteredBy,
            Self::Method => Self::Details,
            Self::Amount => Self::Method,
        }
    }

    /// Whether the field is edited by typing
    pub fn is_text(self) -> bool {
        matches!(self, Self::Date | Self::Details | Self::Amount)
    }
}

/// Step an index through `len` slots, wrapping at both ends
fn step(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

fn label(name: &str) -> String {
    format!("{:>width$}", name, width = LABEL_WIDTH)
}

/// State for the entry form
#[derive(Debug, Clone)]
pub struct EntryFormState {
    pub focused_field: EntryField,
    /// Index into `ExpenseType::ALL`
    pub type_index: usize,
    pub date_input: TextInput,
    pub hour: u32,
    pub minute: u32,
    /// Index into the configured people
    pub person_index: usize,
    pub details_input: TextInput,
    /// Index into `PaymentMethod::ALL`
    pub method_index: usize,
    pub amount_input: TextInput,
    pub error_message: Option<String>,
}

impl Default for EntryFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryFormState {
    /// A fresh form stamped with the current local date and time
    pub fn new() -> Self {
        Self::at(Local::now().naive_local())
    }

    /// A fresh form stamped with the given date and time
    pub fn at(now: NaiveDateTime) -> Self {
        let mut form = Self {
            focused_field: EntryField::Type,
            type_index: 0,
            date_input: TextInput::new()
                .label(label("Date"))
                .placeholder("YYYY-MM-DD")
                .content(now.date().format("%Y-%m-%d").to_string()),
            hour: now.hour(),
            minute: now.minute(),
            person_index: 0,
            details_input: TextInput::new()
                .label(label("Details"))
                .placeholder("Optional note"),
            method_index: 0,
            amount_input: TextInput::new()
                .label(label("Amount"))
                .placeholder("0.00"),
            error_message: None,
        };
        form.update_focus();
        form
    }

    pub fn expense_type(&self) -> ExpenseType {
        ExpenseType::ALL[self.type_index % ExpenseType::ALL.len()]
    }

    pub fn payment_method(&self) -> PaymentMethod {
        PaymentMethod::ALL[self.method_index % PaymentMethod::ALL.len()]
    }

    /// The selected person out of the configured list
    pub fn person<'s>(&self, people: &'s [String]) -> &'s str {
        people
            .get(self.person_index)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
        self.update_focus();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
        self.update_focus();
    }

    pub fn set_focus(&mut self, field: EntryField) {
        self.focused_field = field;
        self.update_focus();
    }

    fn update_focus(&mut self) {
        self.date_input.focused = self.focused_field == EntryField::Date;
        self.details_input.focused = self.focused_field == EntryField::Details;
        self.amount_input.focused = self.focused_field == EntryField::Amount;
    }

    /// The focused text input, if the focused field is a text field
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            EntryField::Date => Some(&mut self.date_input),
            EntryField::Details => Some(&mut self.details_input),
            EntryField::Amount => Some(&mut self.amount_input),
            _ => None,
        }
    }

    /// Step the focused choice field
    ///
    /// Returns false when the focused field is a text field.
    pub fn cycle(&mut self, forward: bool, people_count: usize) -> bool {
        match self.focused_field {
            EntryField::Type => {
                self.type_index = step(self.type_index, ExpenseType::ALL.len(), forward)
            }
            EntryField::Hour => self.hour = step(self.hour as usize, 24, forward) as u32,
            EntryField::Minute => self.minute = step(self.minute as usize, 60, forward) as u32,
            EntryField::EnteredBy => {
                self.person_index = step(self.person_index, people_count, forward)
            }
            EntryField::Method => {
                self.method_index = step(self.method_index, PaymentMethod::ALL.len(), forward)
            }
            EntryField::Date | EntryField::Details | EntryField::Amount => return false,
        }
        true
    }

    /// Whether a typed character belongs in the focused field
    pub fn accepts(&self, c: char) -> bool {
        match self.focused_field {
            EntryField::Date => c.is_ascii_digit() || c == '-',
            EntryField::Amount => c.is_ascii_digit() || c == '.' || c == ',',
            EntryField::Details => !c.is_control(),
            _ => false,
        }
    }

    /// Validate the text fields and collect the form into service input
    pub fn build_input(&self, settings: &Settings) -> Result<EntryInput, String> {
        let date = NaiveDate::parse_from_str(self.date_input.value().trim(), "%Y-%m-%d")
            .map_err(|_| "Invalid date format. Use YYYY-MM-DD".to_string())?;

        let amount_str = self.amount_input.value().trim();
        let amount = if amount_str.is_empty() {
            Money::zero()
        } else {
            settings
                .parse_money(amount_str)
                .map_err(|e| format!("Invalid amount: {}", e))?
        };

        Ok(EntryInput {
            expense_type: self.expense_type(),
            date,
            hour: self.hour,
            minute: self.minute,
            details: self.details_input.value().to_string(),
            entered_by: self.person(&settings.people).to_string(),
            payment_method: self.payment_method(),
            amount,
        })
    }

    /// Clear the per-entry fields after a successful save
    pub fn reset_after_save(&mut self) {
        self.details_input.clear();
        self.amount_input.clear();
        self.error_message = None;
        self.set_focus(EntryField::Type);
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }
}

/// Render the entry page
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let is_focused = app.focused_panel == FocusedPanel::Main;
    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Expense Tracker - Entry Page ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let inner = Rect {
        x: inner.x + 1,
        y: inner.y + 1,
        width: inner.width.saturating_sub(2),
        height: inner.height.saturating_sub(1),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Subheader
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Type
            Constraint::Length(1), // Date
            Constraint::Length(1), // Hour
            Constraint::Length(1), // Minute
            Constraint::Length(1), // Entered by
            Constraint::Length(1), // Details
            Constraint::Length(1), // Method
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Enter Expense Details",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        chunks[0],
    );

    let form = &app.entry_form;
    let focused = |field: EntryField| is_focused && form.focused_field == field;

    render_choice(
        frame,
        chunks[2],
        "Type",
        form.expense_type().as_str(),
        focused(EntryField::Type),
    );
    render_text(frame, chunks[3], &form.date_input, is_focused);
    render_choice(
        frame,
        chunks[4],
        "Hour",
        &format!("{:02}", form.hour),
        focused(EntryField::Hour),
    );
    render_choice(
        frame,
        chunks[5],
        "Minute",
        &format!("{:02}", form.minute),
        focused(EntryField::Minute),
    );
    render_choice(
        frame,
        chunks[6],
        "Entered By",
        form.person(&app.settings.people),
        focused(EntryField::EnteredBy),
    );
    render_text(frame, chunks[7], &form.details_input, is_focused);
    render_choice(
        frame,
        chunks[8],
        "Payment Method",
        form.payment_method().as_str(),
        focused(EntryField::Method),
    );
    render_text(frame, chunks[9], &form.amount_input, is_focused);

    if let Some(ref error) = form.error_message {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            chunks[11],
        );
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Next  "),
        Span::styled("[←/→]", Style::default().fg(Color::Yellow)),
        Span::raw(" Change  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Menu"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[12]);
}

/// Render a text field through the input widget
fn render_text(frame: &mut Frame, area: Rect, input: &TextInput, panel_focused: bool) {
    let mut input = input.clone();
    input.focused &= panel_focused;
    frame.render_widget(input, area);
}

/// Render a choice field, with arrows while focused
fn render_choice(frame: &mut Frame, area: Rect, name: &str, value: &str, focused: bool) {
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let mut spans = vec![Span::styled(label(name), label_style), Span::raw(": ")];
    if focused {
        spans.push(Span::styled("◀ ", Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            value.to_string(),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ));
        spans.push(Span::styled(" ▶", Style::default().fg(Color::Cyan)));
    } else {
        spans.push(Span::styled(value.to_string(), Style::default().fg(Color::Yellow)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Handle key input for the entry page
/// Returns true if the key was handled, false otherwise
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.focused_panel = FocusedPanel::Sidebar;
            return true;
        }
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            save_entry(app);
            return true;
        }
        KeyCode::Enter => {
            save_entry(app);
            return true;
        }
        _ => {}
    }

    let people_count = app.settings.people.len();
    let form = &mut app.entry_form;

    match key.code {
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => form.prev_field(),
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Left | KeyCode::Right => {
            let forward = key.code == KeyCode::Right;
            if !form.cycle(forward, people_count) {
                if let Some(input) = form.focused_input() {
                    if forward {
                        input.move_right();
                    } else {
                        input.move_left();
                    }
                }
            }
        }
        KeyCode::Home => {
            if let Some(input) = form.focused_input() {
                input.move_start();
            }
        }
        KeyCode::End => {
            if let Some(input) = form.focused_input() {
                input.move_end();
            }
        }
        KeyCode::Backspace => {
            form.clear_error();
            if let Some(input) = form.focused_input() {
                input.backspace();
            }
        }
        KeyCode::Delete => {
            form.clear_error();
            if let Some(input) = form.focused_input() {
                input.delete();
            }
        }
        KeyCode::Char(' ') if !form.focused_field.is_text() => {
            form.cycle(true, people_count);
        }
        KeyCode::Char(c) => {
            if !form.accepts(c) {
                return false;
            }
            form.clear_error();
            if let Some(input) = form.focused_input() {
                input.insert(c);
            }
        }
        _ => return false,
    }

    true
}

/// Validate the form and append the entry
fn save_entry(app: &mut App) {
    let input = match app.entry_form.build_input(app.settings) {
        Ok(input) => input,
        Err(e) => {
            app.entry_form.set_error(e);
            return;
        }
    };

    match EntryService::new(app.storage, app.settings).record(input) {
        Ok(expense) => {
            app.entry_form.reset_after_save();
            app.set_status(format!(
                "Entry saved: {}",
                format_expense_saved(&expense, app.settings)
            ));
        }
        Err(e) if e.is_validation() => app.entry_form.set_error(e.to_string()),
        Err(e) => {
            app.entry_form
                .set_error(format!("Error saving entry: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> EntryFormState {
        let now = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        EntryFormState::at(now)
    }

    #[test]
    fn test_defaults() {
        let form = form();
        assert_eq!(form.expense_type(), ExpenseType::Grocery);
        assert_eq!(form.payment_method(), PaymentMethod::Cash);
        assert_eq!(form.date_input.value(), "2024-01-05");
        assert_eq!((form.hour, form.minute), (10, 30));
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut form = form();
        form.prev_field();
        assert_eq!(form.focused_field, EntryField::Amount);
        assert!(form.amount_input.focused);

        form.next_field();
        assert_eq!(form.focused_field, EntryField::Type);
        assert!(!form.amount_input.focused);
    }

    #[test]
    fn test_cycle_choices() {
        let mut form = form();
        assert!(form.cycle(false, 2));
        assert_eq!(form.expense_type(), ExpenseType::EbBill);

        form.set_focus(EntryField::Hour);
        form.hour = 23;
        form.cycle(true, 2);
        assert_eq!(form.hour, 0);

        form.set_focus(EntryField::Minute);
        form.minute = 0;
        form.cycle(false, 2);
        assert_eq!(form.minute, 59);

        form.set_focus(EntryField::Method);
        form.cycle(true, 2);
        assert_eq!(form.payment_method(), PaymentMethod::Phonepay);

        form.set_focus(EntryField::Details);
        assert!(!form.cycle(true, 2));
    }

    #[test]
    fn test_accepts() {
        let mut form = form();
        form.set_focus(EntryField::Amount);
        assert!(form.accepts('5'));
        assert!(form.accepts('.'));
        assert!(!form.accepts('-'));
        assert!(!form.accepts('x'));

        form.set_focus(EntryField::Details);
        assert!(form.accepts('x'));
    }

    #[test]
    fn test_build_input() {
        let settings = Settings::default();
        let mut form = form();
        form.person_index = 1;
        form.details_input.set_value("milk");
        form.amount_input.set_value("50");

        let input = form.build_input(&settings).unwrap();
        assert_eq!(input.entered_by, "Ishwarya");
        assert_eq!(input.details, "milk");
        assert_eq!(input.amount, Money::from_units(50));
        assert_eq!(input.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    }

    #[test]
    fn test_build_input_empty_amount_is_zero() {
        let input = form().build_input(&Settings::default()).unwrap();
        assert!(input.amount.is_zero());
    }

    #[test]
    fn test_build_input_rejects_bad_date() {
        let mut form = form();
        form.date_input.set_value("2024-02-30");
        assert!(form.build_input(&Settings::default()).is_err());
    }

    #[test]
    fn test_reset_after_save_keeps_choices() {
        let mut form = form();
        form.type_index = 4;
        form.details_input.set_value("lunch");
        form.amount_input.set_value("120");
        form.set_focus(EntryField::Amount);

        form.reset_after_save();
        assert_eq!(form.expense_type(), ExpenseType::Food);
        assert_eq!(form.details_input.value(), "");
        assert_eq!(form.amount_input.value(), "");
        assert_eq!(form.focused_field, EntryField::Type);
    }
}
