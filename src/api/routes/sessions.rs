use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use crate::api::models::PageQuery;
use crate::api::AppState;
use crate::engine::pagination::PaginationPlan;
use crate::errors::SharescopeError;
use crate::models::ScanSession;

pub async fn list_sessions(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>, SharescopeError> {
    let plan = PaginationPlan::clamped(query.page, query.limit, state.config.activity_page_size());
    let total = state.db.count_sessions()?;
    let sessions = state.db.list_sessions(plan.limit, plan.offset())?;

    Ok(Json(json!({
        "sessions": sessions,
        "total": total,
        "page": plan.page,
        "limit": plan.limit,
        "total_pages": plan.total_pages(total),
    })))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ScanSession>, SharescopeError> {
    Ok(Json(state.db.require_session(id)?))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, SharescopeError> {
    if state.db.delete_session(id)? {
        Ok(Json(json!({"deleted": true})))
    } else {
        Err(SharescopeError::SessionNotFound(id))
    }
}
