//! Route definitions for the schedule grid.

use axum::routing::get;
use axum::Router;

use crate::handlers::scheduler;
use crate::state::AppState;

/// Scheduler routes mounted at `/schedule`.
///
/// ```text
/// GET  /   -> get_schedule   (any auth state)
/// POST /   -> post_schedule  (staff only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(scheduler::get_schedule).post(scheduler::post_schedule),
    )
}
