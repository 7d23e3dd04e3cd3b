use chrono::Utc;
use crate::errors::TalentError;
use crate::models::{Report, ReportSummary, StoredReport};
use super::Database;

impl Database {
    /// Persist a finished report for `owner_id` and return its new id.
    pub fn insert_report(&self, owner_id: &str, report: &Report) -> Result<String, TalentError> {
        let id = uuid::Uuid::new_v4().to_string();
        let report_json = serde_json::to_string(report)?;
        let now = Utc::now().to_rfc3339();

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO reports (id, owner_id, company_name, company_url, provider, report_json, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            rusqlite::params![id, owner_id, report.company_name, report.company_url, report.provider, report_json, now],
        ).map_err(|e| TalentError::Database(format!("Failed to insert report: {}", e)))?;
        Ok(id)
    }

    pub fn get_report(&self, id: &str, owner_id: &str) -> Result<Option<StoredReport>, TalentError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, company_name, company_url, provider, report_json, created_at, updated_at FROM reports WHERE id = ?1 AND owner_id = ?2"
        ).map_err(|e| TalentError::Database(format!("Query failed: {}", e)))?;

        let result = stmt.query_row(rusqlite::params![id, owner_id], |row: &rusqlite::Row| {
            Ok((
                StoredReport {
                    id: row.get(0)?,
                    owner_id: row.get(1)?,
                    company_name: row.get(2)?,
                    company_url: row.get(3)?,
                    provider: row.get(4)?,
                    report: serde_json::Value::Null,
                    created_at: row.get(6)?,
                    updated_at: row.get(7)?,
                },
                row.get::<_, String>(5)?,
            ))
        });

        match result {
            Ok((mut stored, blob)) => {
                stored.report = serde_json::from_str(&blob)?;
                Ok(Some(stored))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(TalentError::Database(format!("Query error: {}", e))),
        }
    }

    /// Owner's reports, newest first.
    pub fn list_reports(&self, owner_id: &str, limit: usize, offset: usize) -> Result<Vec<ReportSummary>, TalentError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, company_name, company_url, provider, created_at FROM reports WHERE owner_id = ?1 ORDER BY created_at DESC, rowid DESC LIMIT ?2 OFFSET ?3"
        ).map_err(|e| TalentError::Database(format!("Query failed: {}", e)))?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        let rows = stmt.query_map(rusqlite::params![owner_id, limit, offset], |row: &rusqlite::Row| {
            Ok(ReportSummary {
                id: row.get(0)?,
                company_name: row.get(1)?,
                company_url: row.get(2)?,
                provider: row.get(3)?,
                created_at: row.get(4)?,
            })
        }).map_err(|e| TalentError::Database(format!("Query error: {}", e)))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| TalentError::Database(format!("Row error: {}", e)))?);
        }
        Ok(results)
    }

    pub fn delete_report(&self, id: &str, owner_id: &str) -> Result<bool, TalentError> {
        let conn = self.lock()?;
        let affected = conn.execute(
            "DELETE FROM reports WHERE id = ?1 AND owner_id = ?2",
            rusqlite::params![id, owner_id],
        ).map_err(|e| TalentError::Database(format!("Delete failed: {}", e)))?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dimension, DimensionName, TalentSentiment};

    fn sample(company: &str) -> Report {
        Report {
            company_name: company.to_string(),
            company_url: format!("https://{}.example", company.to_lowercase()),
            industry: "Software".into(),
            dimensions: DimensionName::ALL
                .iter()
                .map(|n| Dimension { name: *n, score: 70, benchmark: n.default_benchmark(), insight: "ok".into() })
                .collect(),
            overall_score: 70,
            competitors: vec![],
            summary: "Solid employer.".into(),
            talent_sentiment: TalentSentiment::default(),
            candidate_experience: None,
            generated_at: "2026-01-01T00:00:00Z".into(),
            provider: "gemini".into(),
        }
    }

    #[test]
    fn test_db_insert_and_get_report() {
        let db = Database::in_memory().unwrap();
        let id = db.insert_report("user-1", &sample("Acme")).unwrap();

        let stored = db.get_report(&id, "user-1").unwrap().unwrap();
        assert_eq!(stored.company_name, "Acme");
        assert_eq!(stored.provider, "gemini");
        assert_eq!(stored.report["overallScore"], 70);
        assert_eq!(stored.report["dimensions"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_db_get_report_scoped_to_owner() {
        let db = Database::in_memory().unwrap();
        let id = db.insert_report("user-1", &sample("Acme")).unwrap();
        assert!(db.get_report(&id, "user-2").unwrap().is_none());
        assert!(db.get_report("missing", "user-1").unwrap().is_none());
    }

    #[test]
    fn test_db_list_reports_pagination_and_owner() {
        let db = Database::in_memory().unwrap();
        for i in 0..5 {
            db.insert_report("user-1", &sample(&format!("Co{}", i))).unwrap();
        }
        db.insert_report("user-2", &sample("Other")).unwrap();

        assert_eq!(db.list_reports("user-1", 10, 0).unwrap().len(), 5);
        assert_eq!(db.list_reports("user-1", 2, 0).unwrap().len(), 2);
        assert_eq!(db.list_reports("user-1", 10, 4).unwrap().len(), 1);
        assert_eq!(db.list_reports("user-2", 10, 0).unwrap().len(), 1);

        let newest = &db.list_reports("user-1", 1, 0).unwrap()[0];
        assert_eq!(newest.company_name, "Co4");
    }

    #[test]
    fn test_db_list_reports_huge_offset_is_empty() {
        let db = Database::in_memory().unwrap();
        db.insert_report("user-1", &sample("Acme")).unwrap();
        assert!(db.list_reports("user-1", 10, usize::MAX).unwrap().is_empty());
        assert_eq!(db.list_reports("user-1", usize::MAX, 0).unwrap().len(), 1);
    }

    #[test]
    fn test_db_delete_report() {
        let db = Database::in_memory().unwrap();
        let id = db.insert_report("user-1", &sample("Acme")).unwrap();

        assert!(!db.delete_report(&id, "user-2").unwrap());
        assert!(db.delete_report(&id, "user-1").unwrap());
        assert!(db.get_report(&id, "user-1").unwrap().is_none());
        assert!(!db.delete_report(&id, "user-1").unwrap());
    }
}
