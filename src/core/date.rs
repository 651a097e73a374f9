//! Calendar helpers. All dates are normalized to the Asia/Tbilisi timezone,
//! which is the zone the National Bank of Georgia publishes rates in.

use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

pub const TIMEZONE: Tz = chrono_tz::Asia::Tbilisi;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

#[derive(Debug, Clone, Error, PartialEq)]
#[error("could not parse '{input}' as a date")]
pub struct DateParseError {
    pub input: String,
}

/// A date as requested by a caller, before normalization.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DateQuery {
    /// Latest rates. The request carries no explicit date.
    #[default]
    Today,
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
    Text(String),
}

impl DateQuery {
    /// Returns true when no explicit date was given.
    pub fn is_today(&self) -> bool {
        matches!(self, DateQuery::Today)
    }

    /// Resolves the query to a calendar date in [`TIMEZONE`].
    pub fn to_date(&self, today: NaiveDate) -> Result<NaiveDate, DateParseError> {
        match self {
            DateQuery::Today => Ok(today),
            DateQuery::Date(date) => Ok(*date),
            DateQuery::DateTime(dt) => Ok(dt.with_timezone(&TIMEZONE).date_naive()),
            DateQuery::Text(text) => parse_relative(text, today)
                .map_or_else(|| parse_date(text), Ok),
        }
    }
}

impl From<NaiveDate> for DateQuery {
    fn from(date: NaiveDate) -> Self {
        DateQuery::Date(date)
    }
}

impl<Z: TimeZone> From<DateTime<Z>> for DateQuery {
    fn from(dt: DateTime<Z>) -> Self {
        DateQuery::DateTime(dt.fixed_offset())
    }
}

impl From<&str> for DateQuery {
    fn from(text: &str) -> Self {
        DateQuery::Text(text.to_string())
    }
}

impl From<String> for DateQuery {
    fn from(text: String) -> Self {
        DateQuery::Text(text)
    }
}

impl<T: Into<DateQuery>> From<Option<T>> for DateQuery {
    fn from(value: Option<T>) -> Self {
        value.map_or(DateQuery::Today, Into::into)
    }
}

/// Current calendar date in [`TIMEZONE`].
pub fn today() -> NaiveDate {
    Utc::now().with_timezone(&TIMEZONE).date_naive()
}

fn parse_relative(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    match text.trim().to_lowercase().as_str() {
        "today" | "now" => Some(today),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        "tomorrow" => today.checked_add_days(Days::new(1)),
        _ => None,
    }
}

/// Parses a timestamp or plain date. Inputs with an explicit offset are
/// converted into [`TIMEZONE`]; inputs without one are read as local
/// Tbilisi time, and a plain date maps to local midnight.
pub fn parse_datetime(input: &str) -> Result<DateTime<Tz>, DateParseError> {
    let text = input.trim();
    let err = || DateParseError {
        input: input.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&TIMEZONE));
    }

    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(err)?;

    TIMEZONE
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(err)
}

/// Parses a timestamp or plain date into a calendar date in [`TIMEZONE`].
pub fn parse_date(input: &str) -> Result<NaiveDate, DateParseError> {
    parse_datetime(input).map(|dt| dt.date_naive())
}
