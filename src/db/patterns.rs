use super::Database;
use crate::errors::SharescopeError;
use crate::models::SensitivePattern;

fn pattern_from_row(row: &rusqlite::Row) -> rusqlite::Result<SensitivePattern> {
    Ok(SensitivePattern {
        id: row.get(0)?,
        pattern: row.get(1)?,
        detection_type: row.get(2)?,
        description: row.get(3)?,
        enabled: row.get::<_, i64>(4)? != 0,
    })
}

impl Database {
    pub fn create_pattern(
        &self,
        pattern: &str,
        detection_type: &str,
        description: Option<&str>,
        enabled: bool,
    ) -> Result<i64, SharescopeError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO sensitive_patterns (pattern, detection_type, description, enabled) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![pattern, detection_type, description, enabled as i64],
        ).map_err(|e| SharescopeError::Database(format!("Failed to create pattern: {}", e)))?;
        Ok(conn.last_insert_rowid())
    }

    pub fn list_patterns(&self) -> Result<Vec<SensitivePattern>, SharescopeError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, pattern, detection_type, description, enabled FROM sensitive_patterns ORDER BY id",
        ).map_err(|e| SharescopeError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map([], pattern_from_row)
            .map_err(|e| SharescopeError::Database(format!("Query error: {}", e)))?;

        let mut patterns = Vec::new();
        for row in rows {
            patterns.push(row.map_err(|e| SharescopeError::Database(format!("Row error: {}", e)))?);
        }
        Ok(patterns)
    }

    /// Pattern edits never rewrite historical sensitive_files rows; those
    /// keep whatever detection_type was recorded at scan time.
    pub fn update_pattern(
        &self,
        id: i64,
        pattern: &str,
        detection_type: &str,
        description: Option<&str>,
        enabled: bool,
    ) -> Result<bool, SharescopeError> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute(
            "UPDATE sensitive_patterns SET pattern = ?2, detection_type = ?3, description = ?4, enabled = ?5 WHERE id = ?1",
            rusqlite::params![id, pattern, detection_type, description, enabled as i64],
        ).map_err(|e| SharescopeError::Database(format!("Update failed: {}", e)))?;
        Ok(affected > 0)
    }

    pub fn delete_pattern(&self, id: i64) -> Result<bool, SharescopeError> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute("DELETE FROM sensitive_patterns WHERE id = ?1", rusqlite::params![id])
            .map_err(|e| SharescopeError::Database(format!("Delete failed: {}", e)))?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_create_and_list_patterns() {
        let db = Database::in_memory().unwrap();
        db.create_pattern("*.kdbx", "credentials", Some("KeePass vaults"), true).unwrap();
        db.create_pattern("*salar*", "payroll", None, false).unwrap();

        let patterns = db.list_patterns().unwrap();
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].detection_type, "credentials");
        assert!(patterns[0].enabled);
        assert!(!patterns[1].enabled);
        assert!(patterns[1].description.is_none());
    }

    #[test]
    fn test_db_update_pattern() {
        let db = Database::in_memory().unwrap();
        let id = db.create_pattern("*.pem", "credentials", None, true).unwrap();

        let updated = db.update_pattern(id, "*.pem", "private_keys", Some("PEM key material"), true).unwrap();
        assert!(updated);

        let patterns = db.list_patterns().unwrap();
        assert_eq!(patterns[0].detection_type, "private_keys");
        assert_eq!(patterns[0].description.as_deref(), Some("PEM key material"));
    }

    #[test]
    fn test_db_update_nonexistent_pattern() {
        let db = Database::in_memory().unwrap();
        assert!(!db.update_pattern(99, "*", "x", None, true).unwrap());
    }

    #[test]
    fn test_db_delete_pattern_keeps_historical_rows() {
        let db = Database::in_memory().unwrap();
        let session = db.create_session("corp.example.com", chrono::Utc::now()).unwrap();
        let share = db.record_share(
            session, "H1", "docs", crate::models::AccessLevel::Read, None, 1, 0, 0, chrono::Utc::now(),
        ).unwrap();
        let pattern = db.create_pattern("*.kdbx", "credentials", None, true).unwrap();
        db.record_sensitive_file(share, "\\vault", "passwords.kdbx", "credentials").unwrap();

        assert!(db.delete_pattern(pattern).unwrap());

        // The detection survives the pattern that produced it
        let files = db.sensitive_files_for_share(share).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].detection_type, "credentials");
    }
}
