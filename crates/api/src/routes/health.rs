//! Liveness endpoint, mounted at the root rather than under `/api/v1` so
//! load balancers can probe it without a versioned path.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    db_healthy: bool,
}

/// GET /health
///
/// Reports `"degraded"` (still 200) when the database probe fails, so
/// the process itself is distinguishable from its dependencies.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = conplan_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
