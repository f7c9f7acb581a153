//! Shared helpers for HTTP-level integration tests.
//!
//! Tests drive the full router (middleware included) via
//! `tower::ServiceExt::oneshot`, against a fresh `#[sqlx::test]` database.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use taskdeck_api::auth::jwt::{generate_access_token, JwtConfig};
use taskdeck_api::auth::password::hash_password;
use taskdeck_api::config::ServerConfig;
use taskdeck_api::router::build_app_router;
use taskdeck_api::state::AppState;
use taskdeck_core::types::DbId;
use taskdeck_db::models::user::{CreateUser, User};
use taskdeck_db::repositories::UserRepo;

/// Password every seeded test user logs in with.
pub const TEST_PASSWORD: &str = "correct-horse-battery-staple";

/// Build a test `ServerConfig` with fixed secrets and safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        password_encryption_key: [7u8; 32],
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Mirrors the router construction in `main.rs` so
/// integration tests exercise the same stack that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Insert a user directly and return it with a valid access token.
pub async fn seed_user(pool: &PgPool, name: &str, email: &str, role: &str) -> (User, String) {
    let create = CreateUser {
        name: name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        encrypted_password: None,
        avatar: None,
        phone_number: None,
        dob: None,
        gender: None,
    };
    let user = UserRepo::create(pool, &create)
        .await
        .expect("seeding user should succeed");
    let token = generate_access_token(user.id, name, role, &test_config().jwt)
        .expect("token generation should succeed");
    (user, token)
}

/// Seed the standard admin used by most tests.
pub async fn seed_admin(pool: &PgPool) -> (User, String) {
    seed_user(pool, "Admin", "admin@taskdeck.test", "admin").await
}

/// Seed a regular member.
pub async fn seed_member(pool: &PgPool, name: &str, email: &str) -> (User, String) {
    seed_user(pool, name, email, "member").await
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

fn build_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    }
}

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .expect("request should complete")
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, build_request("GET", uri, token, None)).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, build_request("POST", uri, token, Some(body))).await
}

pub async fn put_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, build_request("PUT", uri, token, Some(body))).await
}

pub async fn patch_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, build_request("PATCH", uri, token, Some(body))).await
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, build_request("DELETE", uri, token, None)).await
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Assert a status and return the JSON body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Seed helpers for project/task fixtures
// ---------------------------------------------------------------------------

/// Create a project through the API, returning its JSON document.
pub async fn create_project(app: &Router, admin_token: &str, name: &str) -> serde_json::Value {
    let response = post_json(
        app,
        "/api/v1/projects",
        Some(admin_token),
        serde_json::json!({
            "name": name,
            "status": "active",
            "priority": "high",
            "description": "integration test project",
            "startDate": "2026-01-01",
        }),
    )
    .await;
    expect_json(response, StatusCode::CREATED).await
}

/// Create a task through the API, returning its JSON document.
pub async fn create_task(
    app: &Router,
    token: &str,
    project_id: DbId,
    title: &str,
    status: &str,
) -> serde_json::Value {
    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/tasks"),
        Some(token),
        serde_json::json!({
            "title": title,
            "status": status,
            "priority": "medium",
        }),
    )
    .await;
    expect_json(response, StatusCode::CREATED).await
}
