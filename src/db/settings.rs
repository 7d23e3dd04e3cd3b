use serde::{Deserialize, Serialize};
use crate::errors::TalentError;
use super::Database;

/// Per-request toggles an operator can flip at runtime through the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeSettings {
    pub research_enabled: bool,
    pub sentiment_enabled: bool,
    pub cache_enabled: bool,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self { research_enabled: true, sentiment_enabled: true, cache_enabled: true }
    }
}

pub const SETTING_KEYS: &[&str] = &["research_enabled", "sentiment_enabled", "cache_enabled"];

impl Database {
    pub fn get_setting(&self, key: &str) -> Result<Option<String>, TalentError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT value FROM settings WHERE key = ?1")
            .map_err(|e| TalentError::Database(format!("Query failed: {}", e)))?;

        match stmt.query_row(rusqlite::params![key], |row: &rusqlite::Row| row.get::<_, String>(0)) {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(TalentError::Database(format!("Query error: {}", e))),
        }
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<(), TalentError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            rusqlite::params![key, value],
        ).map_err(|e| TalentError::Database(format!("Insert failed: {}", e)))?;
        Ok(())
    }

    /// Stored toggles over their defaults. Unparseable values keep the default.
    pub fn runtime_settings(&self) -> Result<RuntimeSettings, TalentError> {
        let mut settings = RuntimeSettings::default();
        let read = |key: &str, default: bool| -> Result<bool, TalentError> {
            Ok(self.get_setting(key)?.and_then(|v| parse_bool(&v)).unwrap_or(default))
        };
        settings.research_enabled = read("research_enabled", settings.research_enabled)?;
        settings.sentiment_enabled = read("sentiment_enabled", settings.sentiment_enabled)?;
        settings.cache_enabled = read("cache_enabled", settings.cache_enabled)?;
        Ok(settings)
    }

    /// Apply a JSON object of toggles. Unknown keys and non-boolean values
    /// are rejected before anything is written.
    pub fn update_runtime_settings(&self, updates: &serde_json::Value) -> Result<RuntimeSettings, TalentError> {
        let obj = updates
            .as_object()
            .ok_or_else(|| TalentError::Validation("Settings body must be a JSON object".into()))?;

        let mut parsed = Vec::with_capacity(obj.len());
        for (key, value) in obj {
            if !SETTING_KEYS.contains(&key.as_str()) {
                return Err(TalentError::Validation(format!("Unknown setting: {}", key)));
            }
            let flag = match value {
                serde_json::Value::Bool(b) => Some(*b),
                serde_json::Value::String(s) => parse_bool(s),
                _ => None,
            }
            .ok_or_else(|| TalentError::Validation(format!("Setting {} must be a boolean", key)))?;
            parsed.push((key.as_str(), flag));
        }

        for (key, flag) in parsed {
            self.set_setting(key, if flag { "true" } else { "false" })?;
        }
        self.runtime_settings()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_db_set_and_get_setting() {
        let db = Database::in_memory().unwrap();
        db.set_setting("research_enabled", "false").unwrap();
        assert_eq!(db.get_setting("research_enabled").unwrap(), Some("false".to_string()));
        assert!(db.get_setting("nonexistent").unwrap().is_none());
    }

    #[test]
    fn test_runtime_settings_defaults() {
        let db = Database::in_memory().unwrap();
        assert_eq!(db.runtime_settings().unwrap(), RuntimeSettings::default());
    }

    #[test]
    fn test_update_runtime_settings() {
        let db = Database::in_memory().unwrap();
        let s = db.update_runtime_settings(&json!({"sentiment_enabled": false, "cache_enabled": "off"})).unwrap();
        assert!(s.research_enabled);
        assert!(!s.sentiment_enabled);
        assert!(!s.cache_enabled);
        assert_eq!(db.get_setting("cache_enabled").unwrap(), Some("false".to_string()));
    }

    #[test]
    fn test_update_rejects_unknown_key_without_partial_write() {
        let db = Database::in_memory().unwrap();
        let err = db.update_runtime_settings(&json!({"cache_enabled": false, "model": "gpt"})).unwrap_err();
        assert!(matches!(err, TalentError::Validation(_)));
        assert!(db.get_setting("cache_enabled").unwrap().is_none());
    }

    #[test]
    fn test_update_rejects_non_boolean() {
        let db = Database::in_memory().unwrap();
        assert!(db.update_runtime_settings(&json!({"research_enabled": 3})).is_err());
        assert!(db.update_runtime_settings(&json!(["research_enabled"])).is_err());
    }

    #[test]
    fn test_garbage_stored_value_keeps_default() {
        let db = Database::in_memory().unwrap();
        db.set_setting("research_enabled", "maybe").unwrap();
        assert!(db.runtime_settings().unwrap().research_enabled);
    }
}
