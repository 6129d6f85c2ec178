use chrono::{DateTime, Utc};

use super::Database;
use crate::errors::SharescopeError;
use crate::models::{RootFile, SensitiveFile};

const SENSITIVE_COLUMNS: &str = "id, share_id, file_path, file_name, detection_type, created_at";
const ROOT_COLUMNS: &str =
    "id, share_id, file_name, file_type, file_size, attributes, created_time, modified_time";

pub(crate) fn sensitive_from_row(row: &rusqlite::Row) -> rusqlite::Result<SensitiveFile> {
    Ok(SensitiveFile {
        id: row.get(0)?,
        share_id: row.get(1)?,
        file_path: row.get(2)?,
        file_name: row.get(3)?,
        detection_type: row.get(4)?,
        created_at: row.get::<_, DateTime<Utc>>(5)?,
    })
}

pub(crate) fn root_from_row(row: &rusqlite::Row) -> rusqlite::Result<RootFile> {
    let attributes: String = row.get(5)?;
    Ok(RootFile {
        id: row.get(0)?,
        share_id: row.get(1)?,
        file_name: row.get(2)?,
        file_type: row.get(3)?,
        file_size: row.get(4)?,
        attributes: split_attributes(&attributes),
        created_time: row.get::<_, Option<DateTime<Utc>>>(6)?,
        modified_time: row.get::<_, Option<DateTime<Utc>>>(7)?,
    })
}

fn split_attributes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Database {
    /// One row per matched pattern; a file matching three patterns is
    /// recorded three times with different detection types.
    pub fn record_sensitive_file(
        &self,
        share_id: i64,
        file_path: &str,
        file_name: &str,
        detection_type: &str,
    ) -> Result<i64, SharescopeError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO sensitive_files (share_id, file_path, file_name, detection_type, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![share_id, file_path, file_name, detection_type, Utc::now()],
        ).map_err(|e| SharescopeError::Database(format!("Failed to record sensitive file: {}", e)))?;
        Ok(conn.last_insert_rowid())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn record_root_file(
        &self,
        share_id: i64,
        file_name: &str,
        file_type: &str,
        file_size: i64,
        attributes: &[String],
        created_time: Option<DateTime<Utc>>,
        modified_time: Option<DateTime<Utc>>,
    ) -> Result<i64, SharescopeError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO root_files (share_id, file_name, file_type, file_size, attributes, created_time, modified_time) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                share_id,
                file_name,
                file_type,
                file_size,
                attributes.join(","),
                created_time,
                modified_time,
            ],
        ).map_err(|e| SharescopeError::Database(format!("Failed to record root file: {}", e)))?;
        Ok(conn.last_insert_rowid())
    }

    pub fn sensitive_files_for_share(&self, share_id: i64) -> Result<Vec<SensitiveFile>, SharescopeError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            &format!("SELECT {} FROM sensitive_files WHERE share_id = ?1 ORDER BY id", SENSITIVE_COLUMNS),
        ).map_err(|e| SharescopeError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map(rusqlite::params![share_id], sensitive_from_row)
            .map_err(|e| SharescopeError::Database(format!("Query error: {}", e)))?;

        let mut files = Vec::new();
        for row in rows {
            files.push(row.map_err(|e| SharescopeError::Database(format!("Row error: {}", e)))?);
        }
        Ok(files)
    }

    /// All sensitive files belonging to one session, via the owning shares.
    pub fn sensitive_files_for_session(&self, session_id: i64) -> Result<Vec<SensitiveFile>, SharescopeError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT f.id, f.share_id, f.file_path, f.file_name, f.detection_type, f.created_at \
             FROM sensitive_files f JOIN shares s ON f.share_id = s.id \
             WHERE s.session_id = ?1 ORDER BY f.id",
        ).map_err(|e| SharescopeError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map(rusqlite::params![session_id], sensitive_from_row)
            .map_err(|e| SharescopeError::Database(format!("Query error: {}", e)))?;

        let mut files = Vec::new();
        for row in rows {
            files.push(row.map_err(|e| SharescopeError::Database(format!("Row error: {}", e)))?);
        }
        Ok(files)
    }

    pub fn all_sensitive_files(&self) -> Result<Vec<SensitiveFile>, SharescopeError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            &format!("SELECT {} FROM sensitive_files ORDER BY id", SENSITIVE_COLUMNS),
        ).map_err(|e| SharescopeError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map([], sensitive_from_row)
            .map_err(|e| SharescopeError::Database(format!("Query error: {}", e)))?;

        let mut files = Vec::new();
        for row in rows {
            files.push(row.map_err(|e| SharescopeError::Database(format!("Row error: {}", e)))?);
        }
        Ok(files)
    }

    pub fn root_files_for_share(&self, share_id: i64) -> Result<Vec<RootFile>, SharescopeError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            &format!("SELECT {} FROM root_files WHERE share_id = ?1 ORDER BY id", ROOT_COLUMNS),
        ).map_err(|e| SharescopeError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map(rusqlite::params![share_id], root_from_row)
            .map_err(|e| SharescopeError::Database(format!("Query error: {}", e)))?;

        let mut files = Vec::new();
        for row in rows {
            files.push(row.map_err(|e| SharescopeError::Database(format!("Row error: {}", e)))?);
        }
        Ok(files)
    }

    pub fn all_root_files(&self) -> Result<Vec<RootFile>, SharescopeError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            &format!("SELECT {} FROM root_files ORDER BY id", ROOT_COLUMNS),
        ).map_err(|e| SharescopeError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map([], root_from_row)
            .map_err(|e| SharescopeError::Database(format!("Query error: {}", e)))?;

        let mut files = Vec::new();
        for row in rows {
            files.push(row.map_err(|e| SharescopeError::Database(format!("Row error: {}", e)))?);
        }
        Ok(files)
    }
}
