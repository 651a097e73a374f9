//! Rate repository for the National Bank of Georgia currencies endpoint.
//!
//! Resolved snapshots are cached per `(language, date)` for the lifetime of
//! the repository. Failed resolutions are never cached.

use crate::core::cache::SnapshotCache;
use crate::core::config::{AppConfig, DEFAULT_BASE_URL, DEFAULT_LANGUAGE};
use crate::core::currency::{CurrencyRecord, RawCurrency};
use crate::core::date::{self, DateQuery};
use crate::core::error::RateError;
use crate::core::snapshot::CurrencySnapshot;
use crate::providers::transport::{HttpTransport, Transport, TransportError};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, instrument, warn};

/// Error key the provider uses for a rejected language code. The spelling is
/// the provider's own.
const LANGUAGE_ERROR_KEY: &str = "langugeCode";

#[derive(Debug, Deserialize)]
struct DailyRates {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    currencies: Option<Vec<Value>>,
}

pub struct RateRepository<T: Transport = HttpTransport> {
    transport: T,
    base_url: String,
    language: String,
    cache: SnapshotCache,
    caching: AtomicBool,
    // Shared by resolves, exclusive while caching is toggled
    caching_lock: RwLock<()>,
    // One lock per (language, date), held across check, fetch and store
    key_locks: Mutex<HashMap<(String, NaiveDate), Arc<Mutex<()>>>>,
}

impl RateRepository<HttpTransport> {
    pub fn from_config(config: &AppConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(&config.provider)?;
        let repository = Self::with_transport(transport, &config.provider.base_url, &config.language);
        repository.caching.store(config.caching, Ordering::SeqCst);
        Ok(repository)
    }
}

impl<T: Transport> RateRepository<T> {
    pub fn with_transport(transport: T, base_url: &str, language: &str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: normalize_language(language),
            cache: SnapshotCache::new(),
            caching: AtomicBool::new(true),
            caching_lock: RwLock::new(()),
            key_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Repository against the public endpoint with the default language.
    pub fn with_default_endpoint(transport: T) -> Self {
        Self::with_transport(transport, DEFAULT_BASE_URL, DEFAULT_LANGUAGE)
    }

    /// Language used when a call passes `None`.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Resolves all rates for a date. `None` language means the repository
    /// default.
    #[instrument(skip(self, date))]
    pub async fn resolve(
        &self,
        date: impl Into<DateQuery>,
        language: Option<&str>,
    ) -> Result<Arc<CurrencySnapshot>, RateError> {
        let query = date.into();
        let language = language.map_or_else(|| self.language.clone(), normalize_language);

        let today = date::today();
        let requested = query
            .to_date(today)
            .map_err(|e| RateError::InvalidDate(e.to_string()))?;
        if requested > today {
            return Err(RateError::DateNotFound(
                "date should not be in the future".to_string(),
            ));
        }

        let _caching_guard = self.caching_lock.read().await;
        let key_lock = self.key_lock(&language, requested).await;
        let _key_guard = key_lock.lock().await;
        let caching = self.caching.load(Ordering::SeqCst);
        if caching && let Some(cached) = self.cache.get(&language, requested).await {
            return Ok(cached);
        }

        let url = self.endpoint_url(&language, (!query.is_today()).then_some(requested));
        let snapshot = Arc::new(self.request(&url, &language, requested).await?);

        if caching {
            self.cache.put(&language, Arc::clone(&snapshot)).await;
        }
        Ok(snapshot)
    }

    pub async fn get_currency(
        &self,
        code: &str,
        date: impl Into<DateQuery>,
        language: Option<&str>,
    ) -> Result<CurrencyRecord, RateError> {
        let snapshot = self.resolve(date, language).await?;
        snapshot.get(code).cloned()
    }

    pub async fn get_rate(
        &self,
        code: &str,
        date: impl Into<DateQuery>,
        language: Option<&str>,
    ) -> Result<f64, RateError> {
        self.get_currency(code, date, language)
            .await
            .map(|currency| currency.rate())
    }

    /// Like [`RateRepository::resolve`], but logs the failure and returns `None`.
    pub async fn find_date(
        &self,
        date: impl Into<DateQuery>,
        language: Option<&str>,
    ) -> Option<Arc<CurrencySnapshot>> {
        self.resolve(date, language).await.map_err(log_failure).ok()
    }

    pub async fn find_currency(
        &self,
        code: &str,
        date: impl Into<DateQuery>,
        language: Option<&str>,
    ) -> Option<CurrencyRecord> {
        self.get_currency(code, date, language)
            .await
            .map_err(log_failure)
            .ok()
    }

    pub async fn find_rate(
        &self,
        code: &str,
        date: impl Into<DateQuery>,
        language: Option<&str>,
    ) -> Option<f64> {
        self.get_rate(code, date, language)
            .await
            .map_err(log_failure)
            .ok()
    }

    /// Resumes caching. The cache starts out empty if caching was disabled.
    pub async fn enable_caching(&self) {
        let _guard = self.caching_lock.write().await;
        self.caching.store(true, Ordering::SeqCst);
        debug!("Caching enabled");
    }

    /// Clears the cache and makes every subsequent resolve fetch.
    pub async fn disable_caching(&self) {
        let _guard = self.caching_lock.write().await;
        self.caching.store(false, Ordering::SeqCst);
        self.cache.clear().await;
        debug!("Caching disabled");
    }

    pub fn is_caching_enabled(&self) -> bool {
        self.caching.load(Ordering::SeqCst)
    }

    /// Number of cached snapshots across all languages.
    pub async fn cached_count(&self) -> usize {
        self.cache.len().await
    }

    /// `<base_url>/<language>/json`, with `?date=` when a date is given.
    pub fn endpoint_url(&self, language: &str, date: Option<NaiveDate>) -> String {
        let url = format!("{}/{}/json", self.base_url, language);
        match date {
            Some(date) => format!("{url}?date={}", date.format("%Y-%m-%d")),
            None => url,
        }
    }

    async fn key_lock(&self, language: &str, date: NaiveDate) -> Arc<Mutex<()>> {
        let mut locks = self.key_locks.lock().await;
        Arc::clone(
            locks
                .entry((language.to_string(), date))
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }

    async fn request(
        &self,
        url: &str,
        language: &str,
        requested: NaiveDate,
    ) -> Result<CurrencySnapshot, RateError> {
        debug!("Requesting rates from {}", url);
        let response = self.transport.fetch(url).await?;

        let payload: Value = match serde_json::from_str(&response.body) {
            Ok(payload) => payload,
            Err(e) if response.is_success() => {
                debug!(error = %e, "Failed to decode response");
                return Err(RateError::DateNotFound("error decoding response".to_string()));
            }
            Err(_) => {
                return Err(TransportError::Status {
                    status: response.status,
                    url: url.to_string(),
                }
                .into());
            }
        };

        if rejects_language(&payload) {
            return Err(RateError::LanguageNotAllowed(language.to_string()));
        }
        if !response.is_success() {
            return Err(TransportError::Status {
                status: response.status,
                url: url.to_string(),
            }
            .into());
        }

        let no_rates = || RateError::DateNotFound(format!("no rates found for {requested}"));
        let days: Vec<DailyRates> = serde_json::from_value(payload).map_err(|_| no_rates())?;
        let currencies = days
            .into_iter()
            .next()
            .filter(|day| day.date.as_deref().is_some_and(|d| !d.trim().is_empty()))
            .and_then(|day| day.currencies)
            .filter(|currencies| !currencies.is_empty())
            .ok_or_else(no_rates)?;

        let entries: Vec<RawCurrency> = currencies
            .into_iter()
            .filter_map(|entry| match serde_json::from_value(entry) {
                Ok(raw) => Some(raw),
                Err(e) => {
                    debug!(error = %e, "Dropping malformed currency entry");
                    None
                }
            })
            .collect();

        let snapshot = CurrencySnapshot::build(&entries, requested);
        debug!(
            count = snapshot.len(),
            date = %requested,
            "Resolved currency snapshot"
        );
        Ok(snapshot)
    }
}

fn normalize_language(language: &str) -> String {
    language.trim().to_lowercase()
}

fn rejects_language(payload: &Value) -> bool {
    let is_language_error =
        |error: &Value| error.get("key").and_then(Value::as_str) == Some(LANGUAGE_ERROR_KEY);
    match payload.get("errors") {
        Some(Value::Array(errors)) => errors.iter().any(is_language_error),
        Some(error) => is_language_error(error),
        None => false,
    }
}

fn log_failure(e: RateError) -> RateError {
    warn!(error = %e, "Rate lookup failed");
    e
}
