use chrono::{DateTime, SecondsFormat, Utc};
use crate::db::Database;
use crate::errors::TalentError;
use super::{CacheEntry, CacheStore};

/// Cache persisted in the `cache_entries` table, shared across restarts.
pub struct DatabaseStore {
    db: Database,
}

impl DatabaseStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl CacheStore for DatabaseStore {
    fn get(&self, key: &str) -> Result<Option<CacheEntry>, TalentError> {
        let conn = self.db.lock()?;
        let mut stmt = conn.prepare("SELECT value, stored_at FROM cache_entries WHERE key = ?1")
            .map_err(|e| TalentError::Database(format!("Query failed: {}", e)))?;

        let row = stmt.query_row(rusqlite::params![key], |row: &rusqlite::Row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        });

        match row {
            Ok((value, stored_at)) => {
                let stored_at = DateTime::parse_from_rfc3339(&stored_at)
                    .map_err(|e| TalentError::Database(format!("Bad cache timestamp: {}", e)))?
                    .with_timezone(&Utc);
                Ok(Some(CacheEntry { value, stored_at }))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(TalentError::Database(format!("Query error: {}", e))),
        }
    }

    fn put(&self, key: &str, entry: CacheEntry) -> Result<(), TalentError> {
        let conn = self.db.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO cache_entries (key, value, stored_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![key, entry.value, stored_at_text(entry.stored_at)],
        ).map_err(|e| TalentError::Database(format!("Insert failed: {}", e)))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), TalentError> {
        let conn = self.db.lock()?;
        conn.execute("DELETE FROM cache_entries WHERE key = ?1", rusqlite::params![key])
            .map_err(|e| TalentError::Database(format!("Delete failed: {}", e)))?;
        Ok(())
    }

    fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, TalentError> {
        let conn = self.db.lock()?;
        conn.execute(
            "DELETE FROM cache_entries WHERE stored_at <= ?1",
            rusqlite::params![stored_at_text(cutoff)],
        ).map_err(|e| TalentError::Database(format!("Delete failed: {}", e)))
    }
}

/// Fixed-width UTC timestamps, so text order matches time order.
fn stored_at_text(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_store_round_trip() {
        let store = DatabaseStore::new(Database::in_memory().unwrap());
        let stored_at = DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z").unwrap().with_timezone(&Utc);
        store.put("acme|acme.com", CacheEntry { value: "{}".into(), stored_at }).unwrap();

        let entry = store.get("acme|acme.com").unwrap().unwrap();
        assert_eq!(entry.stored_at, stored_at);

        store.remove("acme|acme.com").unwrap();
        assert!(store.get("acme|acme.com").unwrap().is_none());
    }

    #[test]
    fn test_database_store_survives_clone_of_handle() {
        let db = Database::in_memory().unwrap();
        let writer = DatabaseStore::new(db.clone());
        let reader = DatabaseStore::new(db);
        writer.put("k", CacheEntry { value: "v".into(), stored_at: Utc::now() }).unwrap();
        assert_eq!(reader.get("k").unwrap().unwrap().value, "v");
    }

    #[test]
    fn test_database_store_purge_older_than() {
        let store = DatabaseStore::new(Database::in_memory().unwrap());
        let now = Utc::now();
        store.put("old", CacheEntry { value: "a".into(), stored_at: now - chrono::Duration::hours(2) }).unwrap();
        store.put("new", CacheEntry { value: "b".into(), stored_at: now }).unwrap();

        assert_eq!(store.purge_older_than(now - chrono::Duration::hours(1)).unwrap(), 1);
        assert!(store.get("old").unwrap().is_none());
        assert!(store.get("new").unwrap().is_some());
    }
}
