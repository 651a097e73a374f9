//! The set of rates published for one date

use crate::core::currency::{CurrencyRecord, RawCurrency};
use crate::core::error::RateError;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

/// Currency records for a single date, keyed by lowercase code.
///
/// Iteration follows the order in which codes first appeared upstream. If a
/// code appears twice the later entry replaces the earlier one in place.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencySnapshot {
    date: NaiveDate,
    records: Vec<(String, CurrencyRecord)>,
    index: HashMap<String, usize>,
}

impl CurrencySnapshot {
    /// Builds a snapshot, dropping every entry that fails to parse.
    pub fn build<'a, I>(entries: I, date: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a RawCurrency>,
    {
        let mut snapshot = Self {
            date,
            records: Vec::new(),
            index: HashMap::new(),
        };
        for entry in entries {
            match CurrencyRecord::from_raw(entry) {
                Ok(record) => snapshot.insert(record),
                Err(e) => debug!(code = ?entry.code, error = %e, "Dropping currency entry"),
            }
        }
        snapshot
    }

    fn insert(&mut self, record: CurrencyRecord) {
        let key = record.code().to_lowercase();
        match self.index.get(&key).copied() {
            Some(pos) => self.records[pos].1 = record,
            None => {
                self.index.insert(key.clone(), self.records.len());
                self.records.push((key, record));
            }
        }
    }

    /// The requested date this snapshot was resolved for.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn get(&self, code: &str) -> Result<&CurrencyRecord, RateError> {
        self.index
            .get(&code.to_lowercase())
            .map(|&pos| &self.records[pos].1)
            .ok_or_else(|| RateError::CurrencyNotFound(code.to_string()))
    }

    pub fn has(&self, code: &str) -> bool {
        self.index.contains_key(&code.to_lowercase())
    }

    /// `(lowercase code, record)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CurrencyRecord)> {
        self.records.iter().map(|(code, record)| (code.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a CurrencySnapshot {
    type Item = (&'a str, &'a CurrencyRecord);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
