use super::ui;
use crate::core::DateQuery;
use crate::core::snapshot::CurrencySnapshot;
use crate::providers::nbg::RateRepository;
use crate::providers::transport::Transport;
use anyhow::Result;
use comfy_table::Cell;

/// Prints the watch list (or every currency) for a date.
pub async fn run<T: Transport>(
    repository: &RateRepository<T>,
    date: DateQuery,
    watch_list: &[String],
    all: bool,
) -> Result<()> {
    let snapshot = repository.resolve(date, None).await?;
    let codes = if all { None } else { Some(watch_list) };

    println!(
        "Rates for {}\n",
        ui::style_text(&snapshot.date().to_string(), ui::StyleType::Title)
    );
    println!("{}", snapshot_table(&snapshot, codes));
    Ok(())
}

/// Renders the snapshot as a table. Codes missing from the snapshot are
/// shown as N/A rows.
pub fn snapshot_table(snapshot: &CurrencySnapshot, codes: Option<&[String]>) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Name"),
        ui::header_cell("Rate"),
        ui::header_cell("Change"),
    ]);

    match codes {
        None => {
            for (_, record) in snapshot {
                table.add_row(vec![
                    Cell::new(record.code()),
                    Cell::new(record.name()),
                    ui::rate_cell(record.rate()),
                    ui::diff_cell(record),
                ]);
            }
        }
        Some(codes) => {
            for code in codes {
                match snapshot.get(code) {
                    Ok(record) => table.add_row(vec![
                        Cell::new(record.code()),
                        Cell::new(record.name()),
                        ui::rate_cell(record.rate()),
                        ui::diff_cell(record),
                    ]),
                    Err(_) => table.add_row(vec![
                        Cell::new(code.to_uppercase()),
                        ui::na_cell(true),
                        ui::na_cell(true),
                        ui::na_cell(true),
                    ]),
                };
            }
        }
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::RawCurrency;
    use chrono::NaiveDate;

    fn snapshot() -> CurrencySnapshot {
        let entries: Vec<RawCurrency> = serde_json::from_str(
            r#"[
                {"code": "USD", "quantity": 1, "rate": 2.6784, "name": "US Dollar", "diff": 0.0112,
                 "date": "2024-05-13", "validFromDate": "2024-05-14"},
                {"code": "EUR", "quantity": 1, "rate": 2.8917, "name": "Euro", "diff": -0.0021,
                 "date": "2024-05-13", "validFromDate": "2024-05-14"}
            ]"#,
        )
        .unwrap();
        CurrencySnapshot::build(&entries, NaiveDate::from_ymd_opt(2024, 5, 14).unwrap())
    }

    #[test]
    fn test_table_with_all_currencies() {
        let output = snapshot_table(&snapshot(), None);
        assert!(output.contains("US Dollar"));
        assert!(output.contains("Euro"));
        assert!(output.contains("2.8917"));
    }

    #[test]
    fn test_table_with_watch_list() {
        let codes = vec!["eur".to_string(), "chf".to_string()];
        let output = snapshot_table(&snapshot(), Some(codes.as_slice()));
        assert!(output.contains("Euro"));
        assert!(!output.contains("US Dollar"));
        assert!(output.contains("CHF"));
        assert!(output.contains("N/A"));
    }
}
