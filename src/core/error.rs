//! Error types surfaced by the rate repository

use crate::providers::transport::TransportError;
use thiserror::Error;

/// Errors returned when resolving rates for a date or looking up a currency.
#[derive(Debug, Error)]
pub enum RateError {
    /// The requested date could not be parsed
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// The date lies in the future, or the provider has no rates for it
    #[error("Date not found: {0}")]
    DateNotFound(String),

    /// The provider rejected the language code
    #[error("Language not allowed: {0}")]
    LanguageNotAllowed(String),

    /// Transport level failure
    #[error("Request failed: {0}")]
    RequestFailed(#[from] TransportError),

    /// The currency code is absent from the resolved snapshot
    #[error("Currency not found: {0}")]
    CurrencyNotFound(String),
}

/// Why a single upstream currency entry was rejected.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("field {field} is not numeric: {value}")]
    NotNumeric { field: &'static str, value: String },

    #[error("field {field} is not a valid date: {source}")]
    BadDate {
        field: &'static str,
        #[source]
        source: crate::core::date::DateParseError,
    },
}
