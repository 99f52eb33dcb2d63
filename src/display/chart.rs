//! Text charts for terminal output
//!
//! Horizontal bar charts scaled to the largest value, used by the CLI
//! analysis report.

use crate::models::Money;

/// Width of the longest bar in characters
pub const BAR_WIDTH: usize = 40;

const BAR_CHAR: char = '█';

/// Render a titled horizontal bar chart with a value label on each bar
///
/// `value_label` formats the number printed after each bar.
pub fn format_bar_chart<F>(title: &str, items: &[(String, Money)], value_label: F) -> String
where
    F: Fn(Money) -> String,
{
    let mut output = String::new();
    output.push_str(title);
    output.push('\n');
    output.push_str(&"-".repeat(title.chars().count()));
    output.push('\n');

    if items.is_empty() {
        output.push_str("(no data)\n");
        return output;
    }

    let label_width = items
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let max = items.iter().map(|(_, v)| *v).max().unwrap_or_default();

    for (label, value) in items {
        let bar = BAR_CHAR.to_string().repeat(bar_length(*value, max, BAR_WIDTH));
        output.push_str(&format!(
            "{:<width$} │{} {}\n",
            label,
            bar,
            value_label(*value),
            width = label_width
        ));
    }

    output
}

/// Number of cells a value occupies when `max` fills `width` cells
///
/// Any non-zero value gets at least one cell so it stays visible.
pub fn bar_length(value: Money, max: Money, width: usize) -> usize {
    if max.cents() <= 0 || value.cents() <= 0 {
        return 0;
    }
    let scaled = (value.cents() as f64 / max.cents() as f64 * width as f64).round() as usize;
    scaled.clamp(1, width)
}
