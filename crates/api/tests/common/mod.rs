//! Shared helpers for integration tests.
//!
//! Builds the full application router (same middleware stack as
//! production) against a `#[sqlx::test]`-provided pool, and provides
//! request/seed helpers.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use conplan_api::auth::jwt::{generate_access_token, JwtConfig};
use conplan_api::config::ServerConfig;
use conplan_api::router::build_app_router;
use conplan_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        debug: false,
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app(pool, test_config())
}

/// Build the router in debug mode, where 5xx responses expose raw fault
/// detail. The flag latches process-wide on first use, so debug-mode
/// assertions live in their own test binary.
pub fn build_debug_test_app(pool: PgPool) -> Router {
    let mut config = test_config();
    config.debug = true;
    build_app(pool, config)
}

fn build_app(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Mint a `Bearer ...` header value for the given user and role.
pub fn bearer(user_id: i64, role: &str) -> String {
    let token = generate_access_token(user_id, role, &test_config().jwt)
        .expect("token generation must succeed");
    format!("Bearer {token}")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a JSON request, optionally with an `Authorization` header.
pub async fn send_json(
    app: Router,
    method: Method,
    path: &str,
    auth: Option<&str>,
    body: &serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json");
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    let request = builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a request with an arbitrary body and content type, for
/// exercising body-parse failures.
pub async fn send_raw(
    app: Router,
    method: Method,
    path: &str,
    auth: Option<&str>,
    content_type: &str,
    body: &str,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", content_type);
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a response is the `{statusText, content, status}` error
/// envelope with the given status code, returning the envelope.
pub async fn assert_error_envelope(
    response: Response<Body>,
    expected: StatusCode,
) -> serde_json::Value {
    assert_eq!(response.status(), expected);
    let json = body_json(response).await;
    assert_eq!(json["status"], expected.as_u16());
    assert!(json["statusText"].is_string());
    assert!(json["content"].is_string());
    json
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

pub async fn seed_convention(pool: &PgPool) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO conventions (name, is_current, max_attendees) \
         VALUES ('TestCon', true, 100) RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn seed_location(pool: &PgPool, convention_id: i64, text: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO locations (convention_id, text) VALUES ($1, $2) RETURNING id")
        .bind(convention_id)
        .bind(text)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn seed_block(pool: &PgPool, text: &str, sort_id: i32) -> i64 {
    sqlx::query_scalar("INSERT INTO time_blocks (text, sort_id) VALUES ($1, $2) RETURNING id")
        .bind(text)
        .bind(sort_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn seed_slot(pool: &PgPool, start: f64, stop: f64) -> i64 {
    sqlx::query_scalar("INSERT INTO time_slots (start, stop) VALUES ($1, $2) RETURNING id")
        .bind(start)
        .bind(stop)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn seed_game(pool: &PgPool, convention_id: i64, user_id: i64, title: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO games (convention_id, title, gm, user_id, last_modified) \
         VALUES ($1, $2, 'Test GM', $3, now()) RETURNING id",
    )
    .bind(convention_id)
    .bind(title)
    .bind(user_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Latest revision comment for a game.
pub async fn latest_revision_comment(pool: &PgPool, game_id: i64) -> String {
    sqlx::query_scalar("SELECT comment FROM revisions WHERE game_id = $1 ORDER BY id DESC LIMIT 1")
        .bind(game_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn last_scheduled(pool: &PgPool, game_id: i64) -> Option<chrono::DateTime<chrono::Utc>> {
    sqlx::query_scalar("SELECT last_scheduled FROM games WHERE id = $1")
        .bind(game_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Database clock reading, for before/after timestamp assertions.
pub async fn db_now(pool: &PgPool) -> chrono::DateTime<chrono::Utc> {
    sqlx::query_scalar("SELECT now()").fetch_one(pool).await.unwrap()
}
