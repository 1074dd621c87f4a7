//! Route definitions for game submission and editing.

use axum::routing::get;
use axum::Router;

use crate::handlers::games;
use crate::state::AppState;

/// Game routes mounted at `/games`.
///
/// ```text
/// GET  /                -> list_games
/// POST /                -> create_game     (requires auth)
/// GET  /{id}            -> get_game
/// PUT  /{id}            -> update_game     (owner only)
/// GET  /{id}/revisions  -> list_revisions  (staff only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(games::list_games).post(games::create_game))
        .route("/{id}", get(games::get_game).put(games::update_game))
        .route("/{id}/revisions", get(games::list_revisions))
}
