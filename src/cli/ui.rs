use crate::core::analytics::display_progress;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const GAUGE_WIDTH: usize = 20;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Formats an amount as `$1,234,567.89`.
pub fn format_money(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{frac_part}")
}

/// Right-aligned money cell.
pub fn money_cell(value: f64) -> Cell {
    Cell::new(format_money(value)).set_alignment(CellAlignment::Right)
}

/// Formats an `Option<T>` into a `Cell`. `None` is displayed as "N/A".
pub fn format_optional_cell<T>(value: Option<T>, format_fn: impl Fn(T) -> String) -> Cell {
    value.map_or(
        Cell::new("N/A")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
        |v| Cell::new(format_fn(v)).set_alignment(CellAlignment::Right),
    )
}

/// Text gauge such as `[#####---------------]  25.0%`.
///
/// The bar is clamped to 0..=100 but the printed figure is not, so
/// overspending still reads as e.g. `130.0%`.
pub fn gauge(progress: f64) -> String {
    let filled = (display_progress(progress) / 100.0 * GAUGE_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>5.1}%",
        "#".repeat(filled),
        "-".repeat(GAUGE_WIDTH - filled),
        progress
    )
}

/// Gauge cell colored by how much of the budget is used.
pub fn progress_cell(progress: Option<f64>) -> Cell {
    match progress {
        Some(p) => {
            let color = if p > 100.0 {
                Color::Red
            } else if p >= 90.0 {
                Color::Yellow
            } else {
                Color::Green
            };
            Cell::new(gauge(p)).fg(color)
        }
        None => Cell::new("N/A").fg(Color::DarkGrey),
    }
}

/// Creates a spinner shown while sheets are being fetched.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(12.5), "$12.50");
        assert_eq!(format_money(1234.56), "$1,234.56");
        assert_eq!(format_money(1234567.891), "$1,234,567.89");
        assert_eq!(format_money(100000.0), "$100,000.00");
        assert_eq!(format_money(-1500.0), "-$1,500.00");
        assert_eq!(format_money(-0.001), "$0.00");
    }

    #[test]
    fn test_gauge_clamps_bar_but_not_figure() {
        assert_eq!(gauge(25.0), "[#####---------------]  25.0%");
        assert_eq!(gauge(130.0), "[####################] 130.0%");
        assert_eq!(gauge(-5.0), "[--------------------]  -5.0%");
    }
}
