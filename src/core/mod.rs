//! Domain types, calendar helpers and the snapshot cache

pub mod cache;
pub mod config;
pub mod currency;
pub mod date;
pub mod error;
pub mod log;
pub mod snapshot;

// Re-export main types for cleaner imports
pub use currency::CurrencyRecord;
pub use date::DateQuery;
pub use error::RateError;
pub use snapshot::CurrencySnapshot;
