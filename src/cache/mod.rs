pub mod database;
pub mod memory;

pub use database::DatabaseStore;
pub use memory::MemoryStore;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use chrono::{DateTime, Duration, Utc};
use crate::config::types::{CacheBackendKind, CacheConfig};
use crate::db::Database;
use crate::errors::TalentError;
use crate::models::{AnalysisRequest, Report};

/// A cached value and the moment it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub value: String,
    pub stored_at: DateTime<Utc>,
}

/// Key-value backend behind [`ReportCache`].
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<CacheEntry>, TalentError>;
    fn put(&self, key: &str, entry: CacheEntry) -> Result<(), TalentError>;
    fn remove(&self, key: &str) -> Result<(), TalentError>;
    /// Drop every entry stored at or before `cutoff`; returns how many went.
    fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, TalentError>;
}

/// Writes between sweeps of expired entries.
pub const SWEEP_INTERVAL: u64 = 32;

/// TTL-bounded report cache. Backend failures are logged and read as misses.
#[derive(Clone)]
pub struct ReportCache {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
    writes: Arc<AtomicU64>,
}

impl ReportCache {
    pub fn new(store: Arc<dyn CacheStore>, ttl_secs: u64) -> Self {
        let secs = i64::try_from(ttl_secs).unwrap_or(i64::MAX).min(i64::MAX / 1000);
        let ttl = Duration::seconds(secs);
        Self { store, ttl, writes: Arc::new(AtomicU64::new(0)) }
    }

    pub fn from_config(config: &CacheConfig, db: &Database) -> Self {
        let store: Arc<dyn CacheStore> = match config.backend {
            CacheBackendKind::Memory => Arc::new(MemoryStore::new()),
            CacheBackendKind::Database => Arc::new(DatabaseStore::new(db.clone())),
        };
        Self::new(store, config.ttl_secs)
    }

    pub fn get(&self, request: &AnalysisRequest) -> Option<Report> {
        self.get_at(request, Utc::now())
    }

    pub fn get_at(&self, request: &AnalysisRequest, now: DateTime<Utc>) -> Option<Report> {
        let key = cache_key(request);
        let entry = match self.store.get(&key) {
            Ok(Some(entry)) => entry,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache read failed");
                return None;
            }
        };

        if now - entry.stored_at >= self.ttl {
            tracing::debug!(key = %key, "Cache entry expired");
            if let Err(e) = self.store.remove(&key) {
                tracing::warn!(key = %key, error = %e, "Failed to evict expired cache entry");
            }
            return None;
        }

        match serde_json::from_str::<Report>(&entry.value) {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Discarding unreadable cache entry");
                if let Err(e) = self.store.remove(&key) {
                    tracing::warn!(key = %key, error = %e, "Failed to evict unreadable cache entry");
                }
                None
            }
        }
    }

    pub fn put(&self, request: &AnalysisRequest, report: &Report) {
        self.put_at(request, report, Utc::now());
    }

    pub fn put_at(&self, request: &AnalysisRequest, report: &Report, now: DateTime<Utc>) {
        let key = cache_key(request);
        let value = match serde_json::to_string(report) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to serialize report for cache");
                return;
            }
        };
        if let Err(e) = self.store.put(&key, CacheEntry { value, stored_at: now }) {
            tracing::warn!(key = %key, error = %e, "Cache write failed");
            return;
        }

        // Keys that are never read again would otherwise stay forever.
        if self.writes.fetch_add(1, Ordering::Relaxed) % SWEEP_INTERVAL == SWEEP_INTERVAL - 1 {
            self.sweep(now);
        }
    }

    /// Remove every entry that has outlived the TTL as of `now`.
    pub fn sweep(&self, now: DateTime<Utc>) {
        match self.store.purge_older_than(now - self.ttl) {
            Ok(0) => {}
            Ok(removed) => tracing::debug!(removed, "Swept expired cache entries"),
            Err(e) => tracing::warn!(error = %e, "Cache sweep failed"),
        }
    }
}

/// Lowercased company name plus the URL host. A role focus, when given,
/// is appended since it changes the prompt.
pub fn cache_key(request: &AnalysisRequest) -> String {
    let name = request.company_name.trim().to_lowercase();
    let mut key = format!("{}|{}", name, url_host(&request.company_url));

    let job = request.job_title.as_deref().unwrap_or("").trim().to_lowercase();
    let seniority = request.seniority_level.as_deref().unwrap_or("").trim().to_lowercase();
    if !job.is_empty() || !seniority.is_empty() {
        // Fixed two slots so a title and a seniority of the same text differ.
        key.push_str(&format!("|job={}|level={}", job, seniority));
    }
    key
}

fn url_host(url: &str) -> String {
    let trimmed = url.trim();
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };
    match reqwest::Url::parse(&candidate) {
        Ok(parsed) => parsed
            .host_str()
            .map(|h| h.trim_start_matches("www.").to_lowercase())
            .unwrap_or_default(),
        Err(_) => trimmed.to_lowercase(),
    }
}
