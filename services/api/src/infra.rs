use crate::report::AnalyticsReport;
use chrono::{DateTime, Duration, Utc};
use job_market::analytics::AnalyticsEngine;
use job_market::listings::{ListingQuery, ListingRecord, ListingStore, StoreError, UpsertOutcome};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) store: Arc<dyn ListingStore>,
    pub(crate) cache: Arc<AnalyticsCache>,
    pub(crate) engine: Arc<AnalyticsEngine>,
    pub(crate) batch_size: usize,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryListingStore {
    records: Arc<Mutex<HashMap<String, ListingRecord>>>,
}

impl InMemoryListingStore {
    fn poisoned<T>(_: PoisonError<T>) -> StoreError {
        StoreError::Unavailable("listing store mutex poisoned".to_string())
    }
}

impl ListingStore for InMemoryListingStore {
    fn upsert_many(&self, listings: Vec<ListingRecord>) -> Result<UpsertOutcome, StoreError> {
        let mut guard = self.records.lock().map_err(Self::poisoned)?;
        let mut outcome = UpsertOutcome::default();

        for listing in listings {
            let Some(url) = listing
                .url
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string)
            else {
                outcome.skipped += 1;
                continue;
            };

            if guard.insert(url, listing).is_some() {
                outcome.updated += 1;
            } else {
                outcome.inserted += 1;
            }
        }

        Ok(outcome)
    }

    fn search(&self, query: &ListingQuery) -> Result<Vec<ListingRecord>, StoreError> {
        let guard = self.records.lock().map_err(Self::poisoned)?;
        let listings: Vec<ListingRecord> = guard.values().cloned().collect();
        Ok(query.select(&listings))
    }
}

#[derive(Debug, Clone)]
struct CachedReport {
    report: AnalyticsReport,
    stored_at: DateTime<Utc>,
}

/// Reports keyed by normalised search parameters, served until they age past
/// the configured TTL.
#[derive(Debug)]
pub(crate) struct AnalyticsCache {
    ttl: Duration,
    entries: Mutex<HashMap<ListingQuery, CachedReport>>,
}

impl AnalyticsCache {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn get(&self, query: &ListingQuery, now: DateTime<Utc>) -> Option<AnalyticsReport> {
        let key = query.normalized();
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        let fresh = entries
            .get(&key)
            .map(|entry| now - entry.stored_at < self.ttl)?;
        if !fresh {
            debug!(keywords = %key.keywords, location = %key.location, "analytics cache entry expired");
            entries.remove(&key);
            return None;
        }

        entries.get(&key).map(|entry| {
            let mut report = entry.report.clone();
            report.meta.cached = true;
            report
        })
    }

    pub(crate) fn put(&self, query: &ListingQuery, report: AnalyticsReport, now: DateTime<Utc>) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            query.normalized(),
            CachedReport {
                report,
                stored_at: now,
            },
        );
    }
}
