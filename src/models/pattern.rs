use serde::{Deserialize, Serialize};

/// A user-managed detection rule. Editing or deleting a pattern does not
/// rewrite historical `SensitiveFile` rows; they keep the detection_type
/// recorded at scan time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivePattern {
    pub id: i64,
    pub pattern: String,
    pub detection_type: String,
    pub description: Option<String>,
    pub enabled: bool,
}
