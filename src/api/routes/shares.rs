use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use crate::api::models::{PageQuery, ShareListQuery};
use crate::api::AppState;
use crate::engine::filter::ShareFilter;
use crate::engine::pagination::PaginationPlan;
use crate::errors::SharescopeError;

pub async fn list_shares(
    State(state): State<AppState>,
    Query(query): Query<ShareListQuery>,
) -> Result<Json<Value>, SharescopeError> {
    let session_id = match query.session_id.as_deref() {
        None | Some("all") | Some("") => None,
        Some(raw) => {
            let id = raw
                .parse::<i64>()
                .map_err(|_| SharescopeError::Config(format!("Invalid session_id: {}", raw)))?;
            // Listing a phantom session must fail, not come back empty
            state.db.require_session(id)?;
            Some(id)
        }
    };

    let filter = ShareFilter::from_request(
        query.search,
        query.detection_type,
        query.match_field.unwrap_or_default(),
        query.match_value,
        session_id,
    );

    let inventory = state.db.full_inventory()?;
    let rows = filter.apply(&inventory);

    let plan = PaginationPlan::clamped(query.page, query.limit, state.config.share_page_size());
    let total = rows.len();

    Ok(Json(json!({
        "shares": plan.slice(&rows),
        "total": total,
        "page": plan.page,
        "limit": plan.limit,
        "total_pages": plan.total_pages(total),
    })))
}

pub async fn list_sensitive_files(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>, SharescopeError> {
    state.db.require_share(id)?;
    let files = state.db.sensitive_files_for_share(id)?;

    let plan = PaginationPlan::clamped(query.page, query.limit, state.config.file_page_size());
    let total = files.len();

    Ok(Json(json!({
        "files": plan.slice(&files),
        "total": total,
        "page": plan.page,
        "limit": plan.limit,
        "total_pages": plan.total_pages(total),
    })))
}

pub async fn list_root_files(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>, SharescopeError> {
    state.db.require_share(id)?;
    let files = state.db.root_files_for_share(id)?;

    let plan = PaginationPlan::clamped(query.page, query.limit, state.config.file_page_size());
    let total = files.len();

    Ok(Json(json!({
        "files": plan.slice(&files),
        "total": total,
        "page": plan.page,
        "limit": plan.limit,
        "total_pages": plan.total_pages(total),
    })))
}
