use crate::core::currency::CurrencyRecord;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Value,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Value => style(text).green().bold(),
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

pub fn rate_cell(rate: f64) -> Cell {
    Cell::new(format!("{rate:.4}"))
        .add_attribute(Attribute::Bold)
        .set_alignment(CellAlignment::Right)
}

/// Signed difference, coloured by change direction.
pub fn diff_cell(record: &CurrencyRecord) -> Cell {
    let color = match record.change() {
        c if c < 0 => Color::Red,
        0 => Color::DarkGrey,
        _ => Color::Green,
    };
    Cell::new(format!(
        "{} {:+.4}",
        record.change_str("▼", "•", "▲"),
        record.diff()
    ))
    .fg(color)
    .set_alignment(CellAlignment::Right)
}

/// Creates a cell for "N/A" values, with error-specific styling.
pub fn na_cell(has_error: bool) -> Cell {
    let color = if has_error {
        Color::Red
    } else {
        Color::DarkGrey
    };
    Cell::new("N/A").fg(color)
}

/// Creates a new `indicatif::ProgressBar` with standard styling.
pub fn new_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
        .map(|s| s.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::date::TIMEZONE;
    use chrono::{NaiveDate, TimeZone};

    fn record(diff: f64) -> CurrencyRecord {
        let date = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
        let valid_from = TIMEZONE
            .with_ymd_and_hms(2024, 5, 14, 0, 0, 0)
            .single()
            .unwrap();
        CurrencyRecord::new("USD", 2.6784, "US Dollar", diff, date, valid_from)
    }

    #[test]
    fn test_diff_cell_arrows() {
        assert_eq!(diff_cell(&record(0.0112)).content(), "▲ +0.0112");
        assert_eq!(diff_cell(&record(-0.0021)).content(), "▼ -0.0021");
        assert_eq!(diff_cell(&record(0.0)).content(), "• +0.0000");
    }

    #[test]
    fn test_style_text_keeps_content() {
        for style_type in [StyleType::Title, StyleType::Value] {
            assert!(style_text("2.6784", style_type).contains("2.6784"));
        }
    }

    #[test]
    fn test_rate_cell_precision() {
        assert_eq!(rate_cell(2.67846).content(), "2.6785");
        assert_eq!(rate_cell(0.017184).content(), "0.0172");
    }
}
