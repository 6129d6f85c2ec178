use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::errors::SharescopeError;

impl IntoResponse for SharescopeError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            SharescopeError::SessionNotFound(_)
            | SharescopeError::ShareNotFound(_)
            | SharescopeError::PatternNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            SharescopeError::Config(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        (status, Json(json!({"error": message}))).into_response()
    }
}
