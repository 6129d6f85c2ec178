use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pattern match inside a share. One physical file yields one row per
/// matching pattern, so (file_path, file_name) can recur with different
/// detection types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitiveFile {
    pub id: i64,
    pub share_id: i64,
    pub file_path: String,
    pub file_name: String,
    /// Open string vocabulary driven by the pattern table, not a fixed enum.
    pub detection_type: String,
    pub created_at: DateTime<Utc>,
}

impl SensitiveFile {
    pub fn key(&self) -> FileKey {
        FileKey {
            file_name: self.file_name.clone(),
            file_path: self.file_path.clone(),
        }
    }
}

/// Identity of a detected file within one share, across sessions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FileKey {
    pub file_name: String,
    pub file_path: String,
}

/// A file found directly at a share's root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootFile {
    pub id: i64,
    pub share_id: i64,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    /// Flag list as reported by the scanner (e.g. hidden, system, readonly).
    pub attributes: Vec<String>,
    pub created_time: Option<DateTime<Utc>>,
    pub modified_time: Option<DateTime<Utc>>,
}

impl RootFile {
    pub fn is_hidden(&self) -> bool {
        self.attributes.iter().any(|a| a == "hidden")
    }
}
