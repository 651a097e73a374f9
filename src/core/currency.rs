//! Currency records as published by the National Bank of Georgia

use crate::core::date::{self, DateParseError};
use crate::core::error::RecordError;
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::Deserialize;
use std::cmp::Ordering;

/// A numeric field the provider may send either as a number or as a string.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    /// NaN and infinities are rejected along with unparsable text.
    fn parse(&self, field: &'static str) -> Result<f64, RecordError> {
        let not_numeric = || RecordError::NotNumeric {
            field,
            value: match self {
                Numeric::Number(n) => n.to_string(),
                Numeric::Text(s) => s.clone(),
            },
        };
        let value = match self {
            Numeric::Number(n) => Some(*n),
            Numeric::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value.filter(|v| v.is_finite()).ok_or_else(not_numeric)
    }
}

/// One currency entry exactly as it appears in the upstream payload.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawCurrency {
    pub code: Option<String>,
    pub quantity: Option<Numeric>,
    pub rate: Option<Numeric>,
    pub name: Option<String>,
    pub diff: Option<Numeric>,
    pub date: Option<String>,
    pub valid_from_date: Option<String>,
}

/// A normalized currency rate. `rate` and `diff` are per single unit.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyRecord {
    code: String,
    rate: f64,
    name: String,
    diff: f64,
    date: NaiveDate,
    valid_from: DateTime<Tz>,
    change: i8,
}

impl CurrencyRecord {
    pub fn new(
        code: &str,
        rate: f64,
        name: &str,
        diff: f64,
        date: NaiveDate,
        valid_from: DateTime<Tz>,
    ) -> Self {
        let change = match diff.partial_cmp(&0.0) {
            Some(Ordering::Greater) => 1,
            Some(Ordering::Less) => -1,
            _ => 0,
        };
        Self {
            code: code.to_string(),
            rate,
            name: name.to_string(),
            diff,
            date,
            valid_from,
            change,
        }
    }

    /// Builds a record from an upstream entry, dividing rate and diff by the
    /// quoted quantity. A quantity of zero or none counts as one.
    pub fn from_raw(raw: &RawCurrency) -> Result<Self, RecordError> {
        let code = raw
            .code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(RecordError::MissingField("code"))?;
        let name = raw.name.as_deref().ok_or(RecordError::MissingField("name"))?;

        let quantity = match &raw.quantity {
            Some(q) => q.parse("quantity")?,
            None => 0.0,
        };
        let quantity = if quantity == 0.0 { 1.0 } else { quantity };

        let rate = raw
            .rate
            .as_ref()
            .ok_or(RecordError::MissingField("rate"))?
            .parse("rate")?;
        let diff = raw
            .diff
            .as_ref()
            .ok_or(RecordError::MissingField("diff"))?
            .parse("diff")?;

        let date = parse_field(raw.date.as_deref(), "date")?.date_naive();
        let valid_from = parse_field(raw.valid_from_date.as_deref(), "validFromDate")?;

        Ok(Self::new(
            code,
            rate / quantity,
            name,
            diff / quantity,
            date,
            valid_from,
        ))
    }

    /// Currency code in the case the provider used.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn diff(&self) -> f64 {
        self.diff
    }

    /// Date the rate was published.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Moment from which the rate is effective.
    pub fn valid_from(&self) -> DateTime<Tz> {
        self.valid_from
    }

    /// Change direction: -1 decreased, 0 unchanged, 1 increased.
    pub fn change(&self) -> i8 {
        self.change
    }

    pub fn increased(&self) -> bool {
        self.change > 0
    }

    pub fn decreased(&self) -> bool {
        self.change < 0
    }

    pub fn unchanged(&self) -> bool {
        self.change == 0
    }

    /// Picks one of three values according to the change direction.
    /// Handy for colours, icons and arrows.
    pub fn change_str<'a>(&self, decreased: &'a str, unchanged: &'a str, increased: &'a str) -> &'a str {
        match self.change {
            c if c < 0 => decreased,
            0 => unchanged,
            _ => increased,
        }
    }
}

fn parse_field(value: Option<&str>, field: &'static str) -> Result<DateTime<Tz>, RecordError> {
    let value = value.ok_or(RecordError::MissingField(field))?;
    date::parse_datetime(value).map_err(|source: DateParseError| RecordError::BadDate { field, source })
}
