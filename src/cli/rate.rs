use super::ui;
use crate::core::DateQuery;
use crate::core::currency::CurrencyRecord;
use crate::providers::nbg::RateRepository;
use crate::providers::transport::Transport;
use anyhow::Result;
use comfy_table::Cell;

/// Prints the per-unit rate for a single currency.
pub async fn run_rate<T: Transport>(
    repository: &RateRepository<T>,
    code: &str,
    date: DateQuery,
) -> Result<()> {
    let rate = repository.get_rate(code, date, None).await?;
    println!(
        "{} {}",
        code.to_uppercase(),
        ui::style_text(&format!("{rate:.4}"), ui::StyleType::Value)
    );
    Ok(())
}

/// Prints every field of a single currency.
pub async fn run_show<T: Transport>(
    repository: &RateRepository<T>,
    code: &str,
    date: DateQuery,
) -> Result<()> {
    let record = repository.get_currency(code, date, None).await?;
    println!("{}", currency_table(&record));
    Ok(())
}

pub fn currency_table(record: &CurrencyRecord) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Field"), ui::header_cell("Value")]);
    table.add_row(vec![Cell::new("Code"), Cell::new(record.code())]);
    table.add_row(vec![Cell::new("Name"), Cell::new(record.name())]);
    table.add_row(vec![Cell::new("Rate"), ui::rate_cell(record.rate())]);
    table.add_row(vec![Cell::new("Change"), ui::diff_cell(record)]);
    table.add_row(vec![
        Cell::new("Date"),
        Cell::new(record.date().format("%Y-%m-%d")),
    ]);
    table.add_row(vec![
        Cell::new("Valid from"),
        Cell::new(record.valid_from().format("%Y-%m-%d %H:%M %Z")),
    ]);
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::date::TIMEZONE;
    use chrono::{NaiveDate, TimeZone};

    #[test]
    fn test_currency_table() {
        let record = CurrencyRecord::new(
            "EUR",
            2.8917,
            "Euro",
            -0.0021,
            NaiveDate::from_ymd_opt(2024, 5, 13).unwrap(),
            TIMEZONE
                .with_ymd_and_hms(2024, 5, 14, 4, 0, 0)
                .single()
                .unwrap(),
        );
        let output = currency_table(&record);
        assert!(output.contains("EUR"));
        assert!(output.contains("Euro"));
        assert!(output.contains("2.8917"));
        assert!(output.contains("-0.0021"));
        assert!(output.contains("2024-05-13"));
        assert!(output.contains("2024-05-14 04:00"));
    }
}
