pub mod errors;
pub mod models;
pub mod routes;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::db::Database;
use crate::errors::SharescopeError;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: AppConfig,
}

pub fn create_app_state(db_path: &str, config: AppConfig) -> Result<AppState, SharescopeError> {
    let db = Database::new(db_path)?;
    Ok(AppState { db, config })
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", axum::routing::get(routes::health::health_check))
        .route("/api/sessions", axum::routing::get(routes::sessions::list_sessions))
        .route("/api/sessions/:id", axum::routing::get(routes::sessions::get_session).delete(routes::sessions::delete_session))
        .route("/api/shares", axum::routing::get(routes::shares::list_shares))
        .route("/api/shares/:id/sensitive-files", axum::routing::get(routes::shares::list_sensitive_files))
        .route("/api/shares/:id/root-files", axum::routing::get(routes::shares::list_root_files))
        .route("/api/diff", axum::routing::get(routes::diff::diff_sessions))
        .route("/api/stats", axum::routing::get(routes::stats::get_stats))
        .route("/api/patterns", axum::routing::get(routes::patterns::list_patterns).post(routes::patterns::create_pattern))
        .route("/api/patterns/:id", axum::routing::put(routes::patterns::update_pattern).delete(routes::patterns::delete_pattern))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
