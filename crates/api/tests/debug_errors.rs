//! Error rendering in debug mode, where server faults expose their raw
//! detail instead of the opaque production message.
//!
//! The debug flag latches process-wide when the first router is built,
//! so these assertions live in their own binary and every test here uses
//! the debug app.

mod common;

use axum::http::{Method, StatusCode};
use common::{assert_error_envelope, build_debug_test_app, get, seed_convention, send_json};
use serde_json::json;
use sqlx::PgPool;

const PRODUCTION_FAULT_MESSAGE: &str = "An error occurred while processing an AJAX request";

#[sqlx::test(migrations = "../db/migrations")]
async fn debug_mode_exposes_server_fault_detail(pool: PgPool) {
    // No convention marked current: a configuration fault the opaque
    // production message would otherwise swallow.
    let response = get(build_debug_test_app(pool), "/api/v1/schedule").await;

    let envelope = assert_error_envelope(response, StatusCode::INTERNAL_SERVER_ERROR).await;
    let content = envelope["content"].as_str().unwrap();
    assert_ne!(content, PRODUCTION_FAULT_MESSAGE);
    assert!(
        content.contains("No convention is marked current"),
        "expected raw fault detail, got: {content}"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn debug_mode_leaves_client_errors_unchanged(pool: PgPool) {
    seed_convention(&pool).await;

    let response = send_json(
        build_debug_test_app(pool),
        Method::POST,
        "/api/v1/schedule",
        None,
        &json!({"id": 1}),
    )
    .await;

    let envelope = assert_error_envelope(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(envelope["content"], "Missing Authorization header");
}
