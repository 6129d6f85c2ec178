use chrono::{DateTime, Utc};

use super::Database;
use crate::errors::SharescopeError;
use crate::models::{AccessLevel, Share};

const SHARE_COLUMNS: &str = "id, session_id, hostname, share_name, access_level, error_message, total_files, total_dirs, hidden_files, scan_time";

pub(crate) fn share_from_row(row: &rusqlite::Row) -> rusqlite::Result<Share> {
    let access_str: String = row.get(4)?;
    let access_level: AccessLevel = serde_json::from_value(serde_json::Value::String(access_str))
        .unwrap_or(AccessLevel::NoAccess);

    Ok(Share {
        id: row.get(0)?,
        session_id: row.get(1)?,
        hostname: row.get(2)?,
        share_name: row.get(3)?,
        access_level,
        error_message: row.get(5)?,
        total_files: row.get(6)?,
        total_dirs: row.get(7)?,
        hidden_files: row.get(8)?,
        scan_time: row.get::<_, DateTime<Utc>>(9)?,
    })
}

impl Database {
    #[allow(clippy::too_many_arguments)]
    pub fn record_share(
        &self,
        session_id: i64,
        hostname: &str,
        share_name: &str,
        access_level: AccessLevel,
        error_message: Option<&str>,
        total_files: i64,
        total_dirs: i64,
        hidden_files: i64,
        scan_time: DateTime<Utc>,
    ) -> Result<i64, SharescopeError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO shares (session_id, hostname, share_name, access_level, error_message, total_files, total_dirs, hidden_files, scan_time) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                session_id,
                hostname,
                share_name,
                access_level.as_str(),
                error_message,
                total_files,
                total_dirs,
                hidden_files,
                scan_time,
            ],
        ).map_err(|e| SharescopeError::Database(format!("Failed to record share: {}", e)))?;
        Ok(conn.last_insert_rowid())
    }

    pub fn get_share(&self, id: i64) -> Result<Option<Share>, SharescopeError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            &format!("SELECT {} FROM shares WHERE id = ?1", SHARE_COLUMNS),
        ).map_err(|e| SharescopeError::Database(format!("Query failed: {}", e)))?;

        match stmt.query_row(rusqlite::params![id], share_from_row) {
            Ok(share) => Ok(Some(share)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(SharescopeError::Database(format!("Query error: {}", e))),
        }
    }

    pub fn require_share(&self, id: i64) -> Result<Share, SharescopeError> {
        self.get_share(id)?.ok_or(SharescopeError::ShareNotFound(id))
    }

    pub fn shares_for_session(&self, session_id: i64) -> Result<Vec<Share>, SharescopeError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            &format!("SELECT {} FROM shares WHERE session_id = ?1 ORDER BY id", SHARE_COLUMNS),
        ).map_err(|e| SharescopeError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map(rusqlite::params![session_id], share_from_row)
            .map_err(|e| SharescopeError::Database(format!("Query error: {}", e)))?;

        let mut shares = Vec::new();
        for row in rows {
            shares.push(row.map_err(|e| SharescopeError::Database(format!("Row error: {}", e)))?);
        }
        Ok(shares)
    }

    pub fn all_shares(&self) -> Result<Vec<Share>, SharescopeError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            &format!("SELECT {} FROM shares ORDER BY id", SHARE_COLUMNS),
        ).map_err(|e| SharescopeError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map([], share_from_row)
            .map_err(|e| SharescopeError::Database(format!("Query error: {}", e)))?;

        let mut shares = Vec::new();
        for row in rows {
            shares.push(row.map_err(|e| SharescopeError::Database(format!("Row error: {}", e)))?);
        }
        Ok(shares)
    }
}
