use axum::{
    extract::{Query, State},
    Json,
};

use crate::api::models::DiffQuery;
use crate::api::AppState;
use crate::engine::diff::{self, DiffReport};
use crate::errors::SharescopeError;

pub async fn diff_sessions(
    State(state): State<AppState>,
    Query(query): Query<DiffQuery>,
) -> Result<Json<DiffReport>, SharescopeError> {
    let report = diff::compare_sessions(&state.db, query.session_a, query.session_b)?;
    Ok(Json(report))
}
