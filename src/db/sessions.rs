use chrono::{DateTime, Utc};

use super::Database;
use crate::errors::SharescopeError;
use crate::models::{ScanSession, ScanStatus};

const SESSION_COLUMNS: &str =
    "id, domain, start_time, end_time, total_hosts, total_shares, total_sensitive_files, status";

pub(crate) fn session_from_row(row: &rusqlite::Row) -> rusqlite::Result<ScanSession> {
    let status_str: String = row.get(7)?;
    // Unknown status text is treated as failed, the only safe assumption
    // for rows written by a newer scanner.
    let status: ScanStatus = serde_json::from_value(serde_json::Value::String(status_str))
        .unwrap_or(ScanStatus::Failed);

    Ok(ScanSession {
        id: row.get(0)?,
        domain: row.get(1)?,
        start_time: row.get::<_, DateTime<Utc>>(2)?,
        end_time: row.get::<_, Option<DateTime<Utc>>>(3)?,
        total_hosts: row.get(4)?,
        total_shares: row.get(5)?,
        total_sensitive_files: row.get(6)?,
        status,
    })
}

impl Database {
    pub fn create_session(&self, domain: &str, start_time: DateTime<Utc>) -> Result<i64, SharescopeError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO scan_sessions (domain, start_time, status) VALUES (?1, ?2, 'running')",
            rusqlite::params![domain, start_time],
        ).map_err(|e| SharescopeError::Database(format!("Failed to create session: {}", e)))?;
        Ok(conn.last_insert_rowid())
    }

    /// Overwrite the running totals the scanner reports as it progresses.
    pub fn update_session_totals(
        &self,
        id: i64,
        total_hosts: i64,
        total_shares: i64,
        total_sensitive_files: i64,
    ) -> Result<(), SharescopeError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE scan_sessions SET total_hosts = ?2, total_shares = ?3, total_sensitive_files = ?4 WHERE id = ?1",
            rusqlite::params![id, total_hosts, total_shares, total_sensitive_files],
        ).map_err(|e| SharescopeError::Database(format!("Update failed: {}", e)))?;
        Ok(())
    }

    /// Freeze a session. Completed and failed sessions get an end_time and
    /// are never written to again.
    pub fn finish_session(&self, id: i64, status: ScanStatus) -> Result<(), SharescopeError> {
        let conn = self.conn.lock().unwrap();
        match status {
            ScanStatus::Completed | ScanStatus::Failed => {
                conn.execute(
                    "UPDATE scan_sessions SET status = ?2, end_time = ?3 WHERE id = ?1",
                    rusqlite::params![id, status.as_str(), Utc::now()],
                ).map_err(|e| SharescopeError::Database(format!("Update failed: {}", e)))?;
            }
            ScanStatus::Running => {
                conn.execute(
                    "UPDATE scan_sessions SET status = ?2 WHERE id = ?1",
                    rusqlite::params![id, status.as_str()],
                ).map_err(|e| SharescopeError::Database(format!("Update failed: {}", e)))?;
            }
        }
        Ok(())
    }

    pub fn get_session(&self, id: i64) -> Result<Option<ScanSession>, SharescopeError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            &format!("SELECT {} FROM scan_sessions WHERE id = ?1", SESSION_COLUMNS),
        ).map_err(|e| SharescopeError::Database(format!("Query failed: {}", e)))?;

        match stmt.query_row(rusqlite::params![id], session_from_row) {
            Ok(session) => Ok(Some(session)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(SharescopeError::Database(format!("Query error: {}", e))),
        }
    }

    /// Like `get_session` but a missing id is an error, never an empty
    /// session. Diffing against a phantom session would hide a data
    /// integrity problem from the operator.
    pub fn require_session(&self, id: i64) -> Result<ScanSession, SharescopeError> {
        self.get_session(id)?.ok_or(SharescopeError::SessionNotFound(id))
    }

    pub fn list_sessions(&self, limit: usize, offset: usize) -> Result<Vec<ScanSession>, SharescopeError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            &format!(
                "SELECT {} FROM scan_sessions ORDER BY start_time DESC, id DESC LIMIT ?1 OFFSET ?2",
                SESSION_COLUMNS
            ),
        ).map_err(|e| SharescopeError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map(rusqlite::params![limit as i64, offset as i64], session_from_row)
            .map_err(|e| SharescopeError::Database(format!("Query error: {}", e)))?;

        let mut sessions = Vec::new();
        for row in rows {
            sessions.push(row.map_err(|e| SharescopeError::Database(format!("Row error: {}", e)))?);
        }
        Ok(sessions)
    }

    pub fn count_sessions(&self) -> Result<usize, SharescopeError> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM scan_sessions", [], |row| row.get(0))
            .map_err(|e| SharescopeError::Database(format!("Query error: {}", e)))?;
        Ok(count as usize)
    }

    pub fn delete_session(&self, id: i64) -> Result<bool, SharescopeError> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute("DELETE FROM scan_sessions WHERE id = ?1", rusqlite::params![id])
            .map_err(|e| SharescopeError::Database(format!("Delete failed: {}", e)))?;
        Ok(affected > 0)
    }
}
