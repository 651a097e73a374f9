use crate::core::snapshot::CurrencySnapshot;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory snapshot cache, keyed by language and then by date.
/// Entries live until [`SnapshotCache::clear`] is called.
#[derive(Clone, Default)]
pub struct SnapshotCache {
    inner: Arc<Mutex<HashMap<String, HashMap<NaiveDate, Arc<CurrencySnapshot>>>>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, language: &str, date: NaiveDate) -> Option<Arc<CurrencySnapshot>> {
        let cache = self.inner.lock().await;
        let value = cache
            .get(language)
            .and_then(|dates| dates.get(&date))
            .cloned();
        if value.is_some() {
            debug!("Cache HIT for {language}/{date}");
        } else {
            debug!("Cache MISS for {language}/{date}");
        }
        value
    }

    pub async fn put(&self, language: &str, snapshot: Arc<CurrencySnapshot>) {
        let mut cache = self.inner.lock().await;
        let date = snapshot.date();
        debug!("Cache PUT for {language}/{date}");
        cache
            .entry(language.to_string())
            .or_default()
            .insert(date, snapshot);
    }

    pub async fn clear(&self) {
        let mut cache = self.inner.lock().await;
        cache.clear();
        debug!("Cache CLEAR");
    }

    /// Number of cached snapshots across all languages.
    pub async fn len(&self) -> usize {
        let cache = self.inner.lock().await;
        cache.values().map(HashMap::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
