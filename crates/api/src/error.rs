use std::sync::OnceLock;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use conplan_core::error::CoreError;
use conplan_db::DbError;
use serde_json::json;

/// Opaque message returned for server faults in non-debug mode.
pub const GENERIC_FAULT_MESSAGE: &str = "An error occurred while processing an AJAX request";

/// Whether error responses expose raw fault detail. Stamped from
/// `ServerConfig::debug` when the router is built; `IntoResponse` has no
/// access to state.
static DEBUG_ERRORS: OnceLock<bool> = OnceLock::new();

/// Record the debug flag for error rendering. Later calls are ignored.
pub fn set_debug_errors(debug: bool) {
    let _ = DEBUG_ERRORS.set(debug);
}

fn debug_errors() -> bool {
    *DEBUG_ERRORS.get().unwrap_or(&false)
}

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the
/// `{statusText, content, status}` error envelope the schedule client
/// expects.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `conplan_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A repository-level error from `conplan_db`.
    #[error(transparent)]
    Db(#[from] DbError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A request body that failed JSON extraction (malformed syntax,
    /// wrong content type, or a shape mismatch).
    #[error("{}", .0.body_text())]
    BodyParse(#[from] JsonRejection),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(core) => classify_core_error(core),

            AppError::Db(db) => match db {
                DbError::Sqlx(err) => classify_sqlx_error(err),
                DbError::Snapshot(err) => {
                    tracing::error!(error = %err, "Snapshot serialization failed");
                    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
                }
                DbError::Configuration(msg) => {
                    tracing::error!(error = %msg, "Configuration error");
                    (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
                }
            },

            AppError::Database(err) => classify_sqlx_error(err),

            // Keep axum's status (400/415/422) but render the detail
            // through the envelope.
            AppError::BodyParse(rejection) => (rejection.status(), rejection.body_text()),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        // Server faults are flattened to an opaque message unless debug
        // mode is on; client faults always carry their named message.
        let content = if status.is_server_error() && !debug_errors() {
            GENERIC_FAULT_MESSAGE.to_string()
        } else {
            message
        };

        let body = json!({
            "statusText": status.canonical_reason().unwrap_or("Error"),
            "content": content,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

fn classify_core_error(err: &CoreError) -> (StatusCode, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        CoreError::Configuration(msg) => {
            tracing::error!(error = %msg, "Configuration error");
            (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
        }
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
        }
    }
}

/// Classify a sqlx error into an HTTP status and message.
///
/// `RowNotFound` maps to 404; everything else is a server fault.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String) {
    match err {
        sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
        other => {
            tracing::error!(error = %other, "Database error");
            (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}
