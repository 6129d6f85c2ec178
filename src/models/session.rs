use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a scan session. A session is mutated only while
/// `Running`; once it reaches `Completed` or `Failed` its rows are frozen
/// and safe to diff against other sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Running,
    Completed,
    Failed,
}

impl ScanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::Running => "running",
            ScanStatus::Completed => "completed",
            ScanStatus::Failed => "failed",
        }
    }
}

/// One execution of the network scanner across a domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSession {
    pub id: i64,
    pub domain: String,
    pub start_time: DateTime<Utc>,
    /// Unset while the session is still running.
    pub end_time: Option<DateTime<Utc>>,
    pub total_hosts: i64,
    pub total_shares: i64,
    pub total_sensitive_files: i64,
    pub status: ScanStatus,
}

impl ScanSession {
    pub fn is_frozen(&self) -> bool {
        self.status != ScanStatus::Running
    }
}
