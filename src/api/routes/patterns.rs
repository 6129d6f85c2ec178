use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::api::models::PatternRequest;
use crate::api::AppState;
use crate::errors::SharescopeError;
use crate::models::SensitivePattern;

pub async fn list_patterns(
    State(state): State<AppState>,
) -> Result<Json<Vec<SensitivePattern>>, SharescopeError> {
    Ok(Json(state.db.list_patterns()?))
}

pub async fn create_pattern(
    State(state): State<AppState>,
    Json(req): Json<PatternRequest>,
) -> Result<(StatusCode, Json<Value>), SharescopeError> {
    let id = state.db.create_pattern(
        &req.pattern,
        &req.detection_type,
        req.description.as_deref(),
        req.enabled.unwrap_or(true),
    )?;
    Ok((StatusCode::CREATED, Json(json!({"id": id}))))
}

pub async fn update_pattern(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<PatternRequest>,
) -> Result<Json<Value>, SharescopeError> {
    let updated = state.db.update_pattern(
        id,
        &req.pattern,
        &req.detection_type,
        req.description.as_deref(),
        req.enabled.unwrap_or(true),
    )?;
    if updated {
        Ok(Json(json!({"updated": true})))
    } else {
        Err(SharescopeError::PatternNotFound(id))
    }
}

pub async fn delete_pattern(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, SharescopeError> {
    if state.db.delete_pattern(id)? {
        Ok(Json(json!({"deleted": true})))
    } else {
        Err(SharescopeError::PatternNotFound(id))
    }
}
