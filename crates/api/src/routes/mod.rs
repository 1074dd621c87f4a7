pub mod games;
pub mod health;
pub mod scheduler;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /schedule                GET scheduler payload, POST staff reassignment
///
/// /games                   GET list, POST submit (authed)
/// /games/{id}              GET one, PUT content edit (owner only)
/// /games/{id}/revisions    GET audit trail (staff only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/schedule", scheduler::router())
        .nest("/games", games::router())
}
