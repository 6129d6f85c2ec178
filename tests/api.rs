use axum::body::Body;
use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use sharescope::api::{build_router, AppState};
use sharescope::config::AppConfig;
use sharescope::db::Database;
use sharescope::models::{AccessLevel, ScanStatus};

fn create_test_state() -> AppState {
    AppState {
        db: Database::in_memory().unwrap(),
        config: AppConfig::default(),
    }
}

fn app(state: &AppState) -> axum::Router {
    build_router(state.clone())
}

fn make_request(method: &str, uri: &str, body: Option<Value>) -> axum::http::Request<Body> {
    let builder = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    match body {
        Some(b) => builder.body(Body::from(serde_json::to_string(&b).unwrap())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn response_json(response: axum::http::Response<Body>) -> Value {
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        panic!("Empty response body. Status: {}, Headers: {:?}", parts.status, parts.headers);
    }
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("JSON parse error: {}. Body: {:?}", e, String::from_utf8_lossy(&bytes)))
}

/// Two completed sessions a week apart. Session 2 changes H1\S1 (access,
/// hidden files, a new detection) and discovers H2\S2.
fn seed_two_sessions(db: &Database) -> (i64, i64) {
    let week1 = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
    let week2 = Utc.with_ymd_and_hms(2026, 3, 8, 8, 0, 0).unwrap();

    let s1 = db.create_session("corp.example.com", week1).unwrap();
    db.record_share(s1, "H1", "S1", AccessLevel::Read, None, 100, 10, 0, week1).unwrap();
    db.update_session_totals(s1, 1, 1, 0).unwrap();
    db.finish_session(s1, ScanStatus::Completed).unwrap();

    let s2 = db.create_session("corp.example.com", week2).unwrap();
    let share = db.record_share(s2, "H1", "S1", AccessLevel::Write, None, 100, 10, 2, week2).unwrap();
    db.record_share(s2, "H2", "S2", AccessLevel::Read, None, 50, 5, 0, week2).unwrap();
    db.record_sensitive_file(share, "\\payroll\\2026", "salaries.xlsx", "payroll").unwrap();
    db.update_session_totals(s2, 2, 2, 1).unwrap();
    db.finish_session(s2, ScanStatus::Completed).unwrap();

    (s1, s2)
}

#[tokio::test]
async fn test_health_endpoint() {
    let state = create_test_state();
    let response = app(&state).oneshot(make_request("GET", "/api/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "sharescope");
}

#[tokio::test]
async fn test_list_sessions_paginated() {
    let state = create_test_state();
    for i in 0..7 {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap() + chrono::Duration::hours(i);
        state.db.create_session("corp.example.com", start).unwrap();
    }

    let response = app(&state).oneshot(make_request("GET", "/api/sessions", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    // Activity-feed default page size is 5
    assert_eq!(body["sessions"].as_array().unwrap().len(), 5);
    assert_eq!(body["total"], 7);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 5);
    assert_eq!(body["total_pages"], 2);

    let response = app(&state)
        .oneshot(make_request("GET", "/api/sessions?page=2&limit=5", None))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["sessions"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_session_not_found() {
    let state = create_test_state();
    let response = app(&state).oneshot(make_request("GET", "/api/sessions/99", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response_json(response).await;
    assert_eq!(body["error"], "Scan session not found: 99");
}

#[tokio::test]
async fn test_delete_session_cascades() {
    let state = create_test_state();
    let (s1, _) = seed_two_sessions(&state.db);

    let response = app(&state)
        .oneshot(make_request("DELETE", &format!("/api/sessions/{}", s1), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app(&state)
        .oneshot(make_request("GET", &format!("/api/sessions/{}", s1), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Session 1's share rows went with it
    let response = app(&state).oneshot(make_request("GET", "/api/stats", None)).await.unwrap();
    let body = response_json(response).await;
    assert_eq!(body["total_shares"], 2);
}

#[tokio::test]
async fn test_list_shares_latest_per_key() {
    let state = create_test_state();
    seed_two_sessions(&state.db);

    let response = app(&state).oneshot(make_request("GET", "/api/shares", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let shares = body["shares"].as_array().unwrap();
    // Three rows exist, but H1\S1 dedupes to its newest snapshot
    assert_eq!(shares.len(), 2);
    assert_eq!(body["total"], 2);
    assert_eq!(body["limit"], 20);
    assert_eq!(body["total_pages"], 1);
    assert_eq!(shares[0]["hostname"], "H1");
    assert_eq!(shares[0]["access_level"], "write");
    assert_eq!(shares[0]["sensitive_file_count"], 1);
}

#[tokio::test]
async fn test_list_shares_session_scope_and_filters() {
    let state = create_test_state();
    let (s1, _) = seed_two_sessions(&state.db);

    let response = app(&state)
        .oneshot(make_request("GET", &format!("/api/shares?session_id={}", s1), None))
        .await
        .unwrap();
    let body = response_json(response).await;
    let shares = body["shares"].as_array().unwrap();
    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0]["access_level"], "read");
    assert_eq!(shares[0]["sensitive_file_count"], 0);

    // Detection-type filter drops shares without a matching detection
    let response = app(&state)
        .oneshot(make_request("GET", "/api/shares?detection_type=payroll", None))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["shares"].as_array().unwrap().len(), 1);
    assert_eq!(body["shares"][0]["hostname"], "H1");

    let response = app(&state)
        .oneshot(make_request("GET", "/api/shares?detection_type=credentials", None))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert!(body["shares"].as_array().unwrap().is_empty());

    // Search reaches into file names
    let response = app(&state)
        .oneshot(make_request("GET", "/api/shares?search=salaries", None))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["shares"].as_array().unwrap().len(), 1);

    // Field match on hostname
    let response = app(&state)
        .oneshot(make_request("GET", "/api/shares?match_field=hostname&match_value=h2", None))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["shares"].as_array().unwrap().len(), 1);
    assert_eq!(body["shares"][0]["hostname"], "H2");
}

#[tokio::test]
async fn test_list_shares_bad_session_values() {
    let state = create_test_state();
    seed_two_sessions(&state.db);

    let response = app(&state)
        .oneshot(make_request("GET", "/api/shares?session_id=abc", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app(&state)
        .oneshot(make_request("GET", "/api/shares?session_id=404", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_share_files() {
    let state = create_test_state();
    let (_, s2) = seed_two_sessions(&state.db);
    let share_id = state.db.shares_for_session(s2).unwrap()[0].id;

    let response = app(&state)
        .oneshot(make_request("GET", &format!("/api/shares/{}/sensitive-files", share_id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["total"], 1);
    // File listings default to a 100-row page
    assert_eq!(body["limit"], 100);
    assert_eq!(body["files"][0]["file_name"], "salaries.xlsx");
    assert_eq!(body["files"][0]["detection_type"], "payroll");

    let response = app(&state)
        .oneshot(make_request("GET", "/api/shares/9999/root-files", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_diff_endpoint() {
    let state = create_test_state();
    let (s1, s2) = seed_two_sessions(&state.db);

    let response = app(&state)
        .oneshot(make_request("GET", &format!("/api/diff?session_a={}&session_b={}", s1, s2), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["summary"]["total_differences"], 2);
    assert_eq!(body["summary"]["added"], 1);
    assert_eq!(body["summary"]["removed"], 0);
    assert_eq!(body["summary"]["modified"], 1);
    assert_eq!(body["summary"]["files_added"], 1);

    let differences = body["differences"].as_array().unwrap();
    assert_eq!(differences[0]["change_type"], "added");
    assert_eq!(differences[0]["hostname"], "H2");
    assert!(differences[0]["file_changes"].is_null());

    assert_eq!(differences[1]["change_type"], "modified");
    assert_eq!(differences[1]["session1_access_level"], "read");
    assert_eq!(differences[1]["session2_access_level"], "write");
    assert_eq!(differences[1]["file_changes"][0]["change_type"], "added");
    assert_eq!(differences[1]["file_changes"][0]["new_detection_types"][0], "payroll");
}

#[tokio::test]
async fn test_diff_unknown_session() {
    let state = create_test_state();
    let (s1, _) = seed_two_sessions(&state.db);

    let response = app(&state)
        .oneshot(make_request("GET", &format!("/api/diff?session_a={}&session_b=404", s1), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response_json(response).await;
    assert_eq!(body["error"], "Scan session not found: 404");
}

#[tokio::test]
async fn test_stats_endpoint() {
    let state = create_test_state();
    seed_two_sessions(&state.db);

    let response = app(&state).oneshot(make_request("GET", "/api/stats", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["unique_shares"], 2);
    assert_eq!(body["total_shares"], 3);
    assert_eq!(body["unique_sensitive_files"], 1);
    assert_eq!(body["total_sensitive_files"], 1);
    assert_eq!(body["unique_hidden_shares"], 1);
    assert_eq!(body["total_hidden_files"], 2);
    // (1/2)*50 + (1/2)*50
    assert_eq!(body["risk_score"], 50.0);
}

#[tokio::test]
async fn test_patterns_crud() {
    let state = create_test_state();

    let response = app(&state)
        .oneshot(make_request("POST", "/api/patterns", Some(json!({
            "pattern": "*.kdbx",
            "detection_type": "credentials",
            "description": "KeePass vaults"
        }))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    let id = body["id"].as_i64().unwrap();

    let response = app(&state).oneshot(make_request("GET", "/api/patterns", None)).await.unwrap();
    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["detection_type"], "credentials");
    assert_eq!(body[0]["enabled"], true);

    let response = app(&state)
        .oneshot(make_request("PUT", &format!("/api/patterns/{}", id), Some(json!({
            "pattern": "*.kdbx",
            "detection_type": "vaults",
            "enabled": false
        }))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app(&state).oneshot(make_request("GET", "/api/patterns", None)).await.unwrap();
    let body = response_json(response).await;
    assert_eq!(body[0]["detection_type"], "vaults");
    assert_eq!(body[0]["enabled"], false);

    let response = app(&state)
        .oneshot(make_request("DELETE", &format!("/api/patterns/{}", id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app(&state)
        .oneshot(make_request("DELETE", &format!("/api/patterns/{}", id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
