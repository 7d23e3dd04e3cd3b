use chrono::{DateTime, Utc};
use dashmap::DashMap;
use crate::errors::TalentError;
use super::{CacheEntry, CacheStore};

/// Process-local cache. Contents vanish on restart.
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, CacheEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<CacheEntry>, TalentError> {
        Ok(self.entries.get(key).map(|e| e.value().clone()))
    }

    fn put(&self, key: &str, entry: CacheEntry) -> Result<(), TalentError> {
        self.entries.insert(key.to_string(), entry);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), TalentError> {
        self.entries.remove(key);
        Ok(())
    }

    fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, TalentError> {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.stored_at > cutoff);
        Ok(before.saturating_sub(self.entries.len()))
    }
}
