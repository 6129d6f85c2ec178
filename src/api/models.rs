use serde::Deserialize;

use crate::engine::filter::MatchField;

/// Query parameters for the filtered share listing.
#[derive(Debug, Deserialize)]
pub struct ShareListQuery {
    pub search: Option<String>,
    pub detection_type: Option<String>,
    pub match_field: Option<MatchField>,
    pub match_value: Option<String>,
    /// Concrete session id, or "all" for the latest row per share.
    pub session_id: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DiffQuery {
    pub session_a: i64,
    pub session_b: i64,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PatternRequest {
    pub pattern: String,
    pub detection_type: String,
    pub description: Option<String>,
    pub enabled: Option<bool>,
}
