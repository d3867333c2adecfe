//! Shared helpers for HTTP-level integration tests.
//!
//! Mirrors the production router construction (`build_router`) so tests
//! exercise the same middleware stack, then adds oneshot request helpers.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use bildir_api::auth::token::SessionConfig;
use bildir_api::config::AppConfig;
use bildir_api::notify::Notifier;
use bildir_api::qr::QrIssuer;
use bildir_api::router::build_router;
use bildir_api::state::AppState;
use bildir_core::catalog::IssueCatalog;

/// Shared admin credential used by the test configuration.
pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASS: &str = "secret";

/// Build a test `AppConfig` with safe defaults and the given QR directory.
pub fn test_config(qr_dir: &Path) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        app_url: "http://localhost:8080".to_string(),
        admin_user: ADMIN_USER.to_string(),
        admin_pass: ADMIN_PASS.to_string(),
        session: SessionConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            ttl_hours: 12,
        },
        qr_dir: qr_dir.to_path_buf(),
        telegram: None,
        request_timeout_secs: 30,
    }
}

/// Build the full application router against the given pool, writing QR
/// artifacts to `qr_dir`.
pub fn build_test_app_with_qr(pool: SqlitePool, qr_dir: &Path) -> Router {
    let config = test_config(qr_dir);
    let state = AppState {
        pool,
        qr: Arc::new(QrIssuer::new(config.qr_dir.clone())),
        config: Arc::new(config),
        catalog: Arc::new(IssueCatalog::builtin()),
        notifier: Arc::new(Notifier::disabled()),
    };
    build_router(state)
}

/// Build the application router with a throwaway QR directory.
pub fn build_test_app(pool: SqlitePool) -> Router {
    let dir: PathBuf = std::env::temp_dir().join(format!("bildir-test-qr-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("QR test directory");
    build_test_app_with_qr(pool, &dir)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, path: &str) -> Response<Body> {
    app.oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn get_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::get(path)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::post(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json_auth(
    app: Router,
    path: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    app.oneshot(
        Request::post(path)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_form(app: Router, path: &str, body: &str) -> Response<Body> {
    app.oneshot(
        Request::post(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ---------------------------------------------------------------------------
// Flow helpers
// ---------------------------------------------------------------------------

/// Log in as the shared admin and return the bearer token.
pub async fn admin_token(app: Router) -> String {
    let body = serde_json::json!({ "username": ADMIN_USER, "password": ADMIN_PASS });
    let response = post_json(app, "/admin/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["token"].as_str().unwrap().to_string()
}

/// Create a staff account via the admin API and log it in.
pub async fn staff_token(app: Router, username: &str, floors: &[i64]) -> String {
    let admin = admin_token(app.clone()).await;

    let body = serde_json::json!({
        "username": username,
        "password": "pass1",
        "floors": floors,
    });
    let response = post_json_auth(app.clone(), "/admin/staff/add", body, &admin).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = serde_json::json!({ "username": username, "password": "pass1" });
    let response = post_json(app, "/staff/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["token"].as_str().unwrap().to_string()
}

/// Create a location via the admin API, returning its id.
pub async fn create_location(
    app: Router,
    token: &str,
    code: &str,
    category: &str,
    floor: Option<i64>,
) -> i64 {
    let body = serde_json::json!({
        "code": code,
        "name": format!("Lokasyon {code}"),
        "type": category,
        "floor": floor,
    });
    let response = post_json_auth(app, "/admin/locations/add", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Submit public feedback, returning the created feedback id.
pub async fn submit_feedback(app: Router, code: &str, issues: &[&str], note: &str) -> i64 {
    let body = serde_json::json!({
        "location_code": code,
        "issues": issues,
        "note": note,
    });
    let response = post_json(app, "/api/feedback", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
