//! Analysis view
//!
//! Filter panel on the left; total, matching entries, the by-type charts
//! and the daily trend on the right. The report is recomputed from the
//! loaded records and the filter state on every draw.

use std::collections::BTreeSet;

use chrono::Duration;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::config::Settings;
use crate::display::{chart::bar_length, truncate};
use crate::models::{Expense, ExpenseType, PaymentMethod};
use crate::reports::{Analysis, ExpenseFilter, FilterOptions};
use crate::tui::app::{App, FocusedPanel};
use crate::tui::layout::AnalysisLayout;

/// One selectable line of the filter panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterRow {
    Type(ExpenseType),
    Method(PaymentMethod),
    Person(String),
    From,
    To,
}

/// Filter selection for the analysis view
#[derive(Debug, Clone, Default)]
pub struct AnalysisState {
    /// Values offered by the loaded records
    pub options: FilterOptions,
    /// Current selection
    pub filter: ExpenseFilter,
    /// Index into `rows()`
    pub cursor: usize,
    /// First table row shown
    pub table_offset: usize,
}

fn toggle_in<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

impl AnalysisState {
    /// Rebuild the options from a fresh record set and select everything
    pub fn reset(&mut self, records: &[Expense]) {
        self.options = FilterOptions::from_records(records);
        self.select_all();
        self.table_offset = 0;
        self.cursor = self.cursor.min(self.rows().len().saturating_sub(1));
    }

    /// Restore the default selection over the current options
    pub fn select_all(&mut self) {
        self.filter = ExpenseFilter::select_all(&self.options);
    }

    /// Filter panel rows in display order
    pub fn rows(&self) -> Vec<FilterRow> {
        let mut rows: Vec<FilterRow> = self
            .options
            .types
            .iter()
            .map(|t| FilterRow::Type(*t))
            .collect();
        rows.extend(self.options.methods.iter().map(|m| FilterRow::Method(*m)));
        rows.extend(self.options.people.iter().cloned().map(FilterRow::Person));
        if self.filter.date_range.is_some() {
            rows.push(FilterRow::From);
            rows.push(FilterRow::To);
        }
        rows
    }

    pub fn current_row(&self) -> Option<FilterRow> {
        self.rows().into_iter().nth(self.cursor)
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.rows().len() {
            self.cursor += 1;
        }
    }

    /// Whether a row's value is part of the selection
    pub fn is_selected(&self, row: &FilterRow) -> bool {
        match row {
            FilterRow::Type(t) => self.filter.types.contains(t),
            FilterRow::Method(m) => self.filter.methods.contains(m),
            FilterRow::Person(p) => self.filter.entered_by.contains(p),
            FilterRow::From | FilterRow::To => true,
        }
    }

    /// Toggle the value under the cursor
    pub fn toggle(&mut self) -> bool {
        match self.current_row() {
            Some(FilterRow::Type(t)) => toggle_in(&mut self.filter.types, t),
            Some(FilterRow::Method(m)) => toggle_in(&mut self.filter.methods, m),
            Some(FilterRow::Person(p)) => toggle_in(&mut self.filter.entered_by, p),
            _ => return false,
        }
        self.table_offset = 0;
        true
    }

    /// Move the date bound under the cursor by whole days
    ///
    /// Bounds may cross; a reversed range selects nothing.
    pub fn shift_date(&mut self, days: i64) -> bool {
        let row = self.current_row();
        let Some(range) = self.filter.date_range.as_mut() else {
            return false;
        };
        let bound = match row {
            Some(FilterRow::From) => &mut range.start,
            Some(FilterRow::To) => &mut range.end,
            _ => return false,
        };
        match bound.checked_add_signed(Duration::days(days)) {
            Some(date) => {
                *bound = date;
                self.table_offset = 0;
                true
            }
            None => false,
        }
    }

    pub fn scroll_table(&mut self, down: bool, page: usize, total_rows: usize) {
        self.table_offset = if down {
            (self.table_offset + page).min(total_rows.saturating_sub(1))
        } else {
            self.table_offset.saturating_sub(page)
        };
    }
}

/// Render the analysis view
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let is_focused = app.focused_panel == FocusedPanel::Main;
    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Expense Analysis ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.records.is_empty() {
        let mut lines = Vec::new();
        if let Some(ref error) = app.load_error {
            lines.push(Line::from(Span::styled(
                error.as_str(),
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::from(Span::styled(
            "No data available to visualize.",
            Style::default().fg(Color::Yellow),
        )));
        frame.render_widget(Paragraph::new(lines), inner);
        return;
    }

    let layout = AnalysisLayout::new(inner);
    let analysis = Analysis::generate(&app.records, app.analysis.filter.clone());
    let settings = app.settings;

    render_filters(frame, &app.analysis, settings, is_focused, layout.filters);
    render_total(frame, &analysis, settings, layout.total);
    render_table(frame, &analysis, settings, app.analysis.table_offset, layout.table);
    render_type_chart(frame, &analysis, settings, layout.by_type);
    render_shares(frame, &analysis, layout.shares);
    render_daily_chart(frame, &analysis, layout.by_date);
}

fn section_header(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))
}

fn render_filters(
    frame: &mut Frame,
    state: &AnalysisState,
    settings: &Settings,
    focused: bool,
    area: Rect,
) {
    let block = Block::default()
        .title(" Filters ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let mut lines = Vec::new();
    let mut cursor_line = 0;
    let mut previous: Option<&'static str> = None;

    for (index, row) in state.rows().iter().enumerate() {
        let section = match row {
            FilterRow::Type(_) => "Expense Type",
            FilterRow::Method(_) => "Payment Method",
            FilterRow::Person(_) => "Entered By",
            FilterRow::From | FilterRow::To => "Date Range",
        };
        if previous != Some(section) {
            if previous.is_some() {
                lines.push(Line::default());
            }
            lines.push(section_header(section));
            previous = Some(section);
        }

        let text = match row {
            FilterRow::Type(t) => format!("[{}] {}", mark(state.is_selected(row)), t),
            FilterRow::Method(m) => format!("[{}] {}", mark(state.is_selected(row)), m),
            FilterRow::Person(p) => format!("[{}] {}", mark(state.is_selected(row)), p),
            FilterRow::From => format!(
                "From ◀ {} ▶",
                state
                    .filter
                    .date_range
                    .map(|r| r.start.format(&settings.date_format).to_string())
                    .unwrap_or_default()
            ),
            FilterRow::To => format!(
                "To   ◀ {} ▶",
                state
                    .filter
                    .date_range
                    .map(|r| r.end.format(&settings.date_format).to_string())
                    .unwrap_or_default()
            ),
        };

        let style = if focused && index == state.cursor {
            cursor_line = lines.len();
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else if state.is_selected(row) {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    let visible = area.height.saturating_sub(2) as usize;
    let scroll = (cursor_line + 1).saturating_sub(visible) as u16;

    frame.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), area);
}

fn mark(selected: bool) -> char {
    if selected {
        'x'
    } else {
        ' '
    }
}

fn render_total(frame: &mut Frame, analysis: &Analysis, settings: &Settings, area: Rect) {
    let mut spans = vec![
        Span::raw("Total Expense: "),
        Span::styled(
            settings.format_money(analysis.total),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   ({} entries)", analysis.records.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if let Some(range) = analysis.filter.date_range {
        if range.start > range.end {
            spans.push(Span::styled(
                "   start date is after end date",
                Style::default().fg(Color::Red),
            ));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_table(
    frame: &mut Frame,
    analysis: &Analysis,
    settings: &Settings,
    offset: usize,
    area: Rect,
) {
    let block = Block::default()
        .title(" Filtered Data ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let header = Row::new(
        ["Type", "Date", "Time", "Details", "Entered By", "Method", "Amount"]
            .into_iter()
            .map(|h| Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))),
    )
    .style(Style::default().fg(Color::Cyan));

    let rows: Vec<Row> = analysis
        .records
        .iter()
        .skip(offset)
        .map(|e| {
            Row::new(vec![
                Cell::from(e.expense_type.as_str()),
                Cell::from(e.date.format(&settings.date_format).to_string()),
                Cell::from(e.time_label()),
                Cell::from(truncate(&e.details, 30)),
                Cell::from(e.entered_by.clone()),
                Cell::from(e.payment_method.as_str()),
                Cell::from(Line::from(settings.format_money(e.amount)).alignment(Alignment::Right)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(5),
        Constraint::Min(10),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

/// Bar width that fits `count` bars with one-cell gaps
fn fit_bar_width(area: Rect, count: usize, max: u16) -> u16 {
    if count == 0 {
        return max;
    }
    let available = area.width.saturating_sub(2) as usize;
    let per_bar = (available / count).saturating_sub(1);
    (per_bar as u16).clamp(1, max)
}

fn render_type_chart(frame: &mut Frame, analysis: &Analysis, settings: &Settings, area: Rect) {
    let block = Block::default()
        .title(" Expense Type Distribution ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let bars: Vec<Bar> = analysis
        .by_type
        .iter()
        .map(|t| {
            Bar::default()
                .value(t.amount.cents().max(0) as u64)
                .label(Line::from(t.expense_type.as_str()))
                .text_value(settings.format_money(t.amount))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(fit_bar_width(area, bars.len(), 10))
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));

    frame.render_widget(chart, area);
}

fn render_shares(frame: &mut Frame, analysis: &Analysis, area: Rect) {
    let block = Block::default()
        .title(" Expense Type Breakdown ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let bar_width = area.width.saturating_sub(24) as usize;
    let max = analysis.shares.iter().map(|s| s.amount).max().unwrap_or_default();

    let lines: Vec<Line> = analysis
        .shares
        .iter()
        .map(|share| {
            Line::from(vec![
                Span::raw(format!("{:<11}", share.expense_type.as_str())),
                Span::styled(
                    format!("{:>6.1}% ", share.percentage),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    "█".repeat(bar_length(share.amount, max, bar_width)),
                    Style::default().fg(Color::Magenta),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_daily_chart(frame: &mut Frame, analysis: &Analysis, area: Rect) {
    let block = Block::default()
        .title(" Daily Expenditure Trend ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let bars: Vec<Bar> = analysis
        .by_date
        .iter()
        .map(|d| {
            Bar::default()
                .value(d.amount.cents().max(0) as u64)
                .label(Line::from(d.date.format("%m-%d").to_string()))
                .text_value(d.amount.units().to_string())
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(fit_bar_width(area, bars.len(), 6))
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Green))
        .value_style(Style::default().fg(Color::Black).bg(Color::Green));

    frame.render_widget(chart, area);
}

/// Handle key input for the analysis view
/// Returns true if the key was handled, false otherwise
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.focused_panel = FocusedPanel::Sidebar;
        }
        KeyCode::Up | KeyCode::Char('k') => app.analysis.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.analysis.move_down(),
        KeyCode::Char(' ') | KeyCode::Enter => {
            app.analysis.toggle();
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.analysis.shift_date(-1);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.analysis.shift_date(1);
        }
        KeyCode::Char('a') => {
            app.analysis.select_all();
            app.set_status("Filters reset");
        }
        KeyCode::Char('r') => {
            app.reload_records();
            app.set_status(format!("Loaded {} entries", app.records.len()));
        }
        KeyCode::PageDown => {
            let total = app.records.len();
            app.analysis.scroll_table(true, 10, total);
        }
        KeyCode::PageUp => {
            let total = app.records.len();
            app.analysis.scroll_table(false, 10, total);
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::reports::DateRange;
    use chrono::{NaiveDate, NaiveTime};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn record(t: ExpenseType, day: u32, m: PaymentMethod, by: &str) -> Expense {
        Expense::new(
            t,
            date(day),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            "",
            by,
            m,
            Money::from_units(10),
        )
    }

    fn state() -> AnalysisState {
        let records = vec![
            record(ExpenseType::Food, 5, PaymentMethod::Cash, "Vethik"),
            record(ExpenseType::Grocery, 7, PaymentMethod::Phonepay, "Ishwarya"),
        ];
        let mut state = AnalysisState::default();
        state.reset(&records);
        state
    }

    #[test]
    fn test_rows_follow_options() {
        let state = state();
        assert_eq!(
            state.rows(),
            vec![
                FilterRow::Type(ExpenseType::Food),
                FilterRow::Type(ExpenseType::Grocery),
                FilterRow::Method(PaymentMethod::Cash),
                FilterRow::Method(PaymentMethod::Phonepay),
                FilterRow::Person("Vethik".into()),
                FilterRow::Person("Ishwarya".into()),
                FilterRow::From,
                FilterRow::To,
            ]
        );
    }

    #[test]
    fn test_empty_records_have_no_rows() {
        let mut state = AnalysisState::default();
        state.reset(&[]);
        assert!(state.rows().is_empty());
        assert!(!state.toggle());
        assert!(!state.shift_date(1));
    }

    #[test]
    fn test_toggle() {
        let mut state = state();
        state.cursor = 1;
        assert!(state.toggle());
        assert!(!state.filter.types.contains(&ExpenseType::Grocery));
        assert!(state.toggle());
        assert!(state.filter.types.contains(&ExpenseType::Grocery));

        state.cursor = 5;
        state.toggle();
        assert!(!state.filter.entered_by.contains("Ishwarya"));

        state.select_all();
        assert!(state.filter.entered_by.contains("Ishwarya"));
    }

    #[test]
    fn test_shift_date() {
        let mut state = state();
        state.cursor = 6;
        assert!(state.shift_date(1));
        state.cursor = 7;
        assert!(state.shift_date(-3));
        assert_eq!(state.filter.date_range, Some(DateRange::new(date(6), date(4))));

        state.cursor = 0;
        assert!(!state.shift_date(1));
    }

    #[test]
    fn test_cursor_bounds() {
        let mut state = state();
        state.move_up();
        assert_eq!(state.cursor, 0);
        for _ in 0..20 {
            state.move_down();
        }
        assert_eq!(state.cursor, 7);
        assert_eq!(state.current_row(), Some(FilterRow::To));
    }
}
