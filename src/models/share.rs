use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access the scanner obtained on a share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    NoAccess,
    List,
    Read,
    Write,
    Full,
    Special,
}

impl AccessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::NoAccess => "no_access",
            AccessLevel::List => "list",
            AccessLevel::Read => "read",
            AccessLevel::Write => "write",
            AccessLevel::Full => "full",
            AccessLevel::Special => "special",
        }
    }
}

/// One network share observed during one scan session. A new scan produces
/// wholly new rows; rows are never updated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Share {
    pub id: i64,
    pub session_id: i64,
    pub hostname: String,
    pub share_name: String,
    pub access_level: AccessLevel,
    /// Set when the scanner could not fully walk the share.
    pub error_message: Option<String>,
    pub total_files: i64,
    pub total_dirs: i64,
    pub hidden_files: i64,
    pub scan_time: DateTime<Utc>,
}

impl Share {
    /// Identity of the share across sessions. Surrogate ids are not stable
    /// between scans; (hostname, share_name) is.
    pub fn key(&self) -> ShareKey {
        ShareKey {
            hostname: self.hostname.clone(),
            share_name: self.share_name.clone(),
        }
    }
}

/// Natural key recognising the same physical share across scan sessions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShareKey {
    pub hostname: String,
    pub share_name: String,
}
