use super::ui;
use crate::core::currency::CurrencyRecord;
use crate::core::date;
use crate::providers::nbg::RateRepository;
use crate::providers::transport::Transport;
use anyhow::Result;
use chrono::{Days, NaiveDate};
use comfy_table::Cell;
use futures::future::join_all;

/// Prints a currency's rate for each of the last `days` days, newest first.
/// Days without published rates show as N/A.
pub async fn run<T: Transport>(
    repository: &RateRepository<T>,
    code: &str,
    days: u32,
) -> Result<()> {
    let dates = recent_dates(date::today(), days);

    let pb = ui::new_progress_bar(dates.len() as u64);
    let lookups = dates.iter().map(|day| {
        let pb = pb.clone();
        async move {
            let record = repository.find_currency(code, *day, None).await;
            pb.inc(1);
            (*day, record)
        }
    });
    let rows = join_all(lookups).await;
    pb.finish_and_clear();

    println!(
        "History for {}\n",
        ui::style_text(&code.to_uppercase(), ui::StyleType::Title)
    );
    println!("{}", history_table(&rows));
    Ok(())
}

pub fn recent_dates(today: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..u64::from(days))
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .collect()
}

pub fn history_table(rows: &[(NaiveDate, Option<CurrencyRecord>)]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Rate"),
        ui::header_cell("Change"),
    ]);
    for (day, record) in rows {
        let date_cell = Cell::new(day.format("%Y-%m-%d %a"));
        match record {
            Some(record) => table.add_row(vec![
                date_cell,
                ui::rate_cell(record.rate()),
                ui::diff_cell(record),
            ]),
            None => table.add_row(vec![date_cell, ui::na_cell(false), ui::na_cell(false)]),
        };
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::date::TIMEZONE;
    use chrono::TimeZone;

    #[test]
    fn test_recent_dates() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let dates = recent_dates(today, 3);
        assert_eq!(
            dates,
            vec![
                today,
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            ]
        );
        assert!(recent_dates(today, 0).is_empty());
    }

    #[test]
    fn test_history_table() {
        let friday = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let saturday = NaiveDate::from_ymd_opt(2024, 5, 11).unwrap();
        let record = CurrencyRecord::new(
            "USD",
            2.6784,
            "US Dollar",
            0.0112,
            friday,
            TIMEZONE
                .with_ymd_and_hms(2024, 5, 11, 0, 0, 0)
                .single()
                .unwrap(),
        );
        let output = history_table(&[(saturday, None), (friday, Some(record))]);
        assert!(output.contains("2024-05-11 Sat"));
        assert!(output.contains("2024-05-10 Fri"));
        assert!(output.contains("2.6784"));
        assert!(output.contains("N/A"));
    }
}
