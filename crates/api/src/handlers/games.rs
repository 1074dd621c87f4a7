//! Handlers for game submission, editing, and listing.
//!
//! Content fields are editable only by the submitting user; schedule
//! fields change only through the scheduler endpoint. Every save records
//! an audit revision.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use validator::Validate;

use conplan_core::error::CoreError;
use conplan_core::schedule::combined_label;
use conplan_core::types::DbId;
use conplan_db::models::game::{CreateGame, Game, UpdateGame};
use conplan_db::models::schedule::{TimeBlock, TimeSlot};
use conplan_db::repositories::{ConventionRepo, GameRepo, RevisionRepo, ScheduleRepo};

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Placeholder shown for games without a block/slot assignment.
const NOT_SCHEDULED: &str = "Not Scheduled";

/// A game with its human-readable schedule strings.
#[derive(Debug, Serialize)]
pub struct GameView {
    #[serde(flatten)]
    pub game: Game,
    /// The assigned block's text, or `"Not Scheduled"`.
    pub friendly_block: String,
    /// Combined block + slot label, or `"Not Scheduled"`.
    pub combined_time: String,
}

fn game_view(game: Game, block: Option<&TimeBlock>, slot: Option<&TimeSlot>) -> GameView {
    let friendly_block = block
        .map(|b| b.text.clone())
        .unwrap_or_else(|| NOT_SCHEDULED.to_string());

    let combined_time = match (block, slot) {
        (Some(block), Some(slot)) => combined_label(&block.text, &slot.label()),
        _ => NOT_SCHEDULED.to_string(),
    };

    GameView {
        game,
        friendly_block,
        combined_time,
    }
}

// ---------------------------------------------------------------------------
// Read handlers
// ---------------------------------------------------------------------------

/// GET /games
///
/// List the current convention's games in schedule order (block, slot,
/// title; unscheduled last) with display strings.
pub async fn list_games(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let convention = ConventionRepo::current(&state.pool).await?;
    let games = GameRepo::list_for_schedule(&state.pool, convention.id).await?;
    let blocks = ScheduleRepo::blocks(&state.pool).await?;
    let slots = ScheduleRepo::slots(&state.pool).await?;

    let views: Vec<GameView> = games
        .into_iter()
        .map(|game| {
            let block = game
                .time_block_id
                .and_then(|id| blocks.iter().find(|b| b.id == id));
            let slot = game
                .time_slot_id
                .and_then(|id| slots.iter().find(|s| s.id == id));
            game_view(game, block, slot)
        })
        .collect();

    Ok(Json(DataResponse { data: views }))
}

/// GET /games/{id}
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let game = find_game(&state, id).await?;

    let block = match game.time_block_id {
        Some(id) => ScheduleRepo::block_by_id(&state.pool, id).await?,
        None => None,
    };
    let slot = match game.time_slot_id {
        Some(id) => ScheduleRepo::slot_by_id(&state.pool, id).await?,
        None => None,
    };

    Ok(Json(DataResponse {
        data: game_view(game, block.as_ref(), slot.as_ref()),
    }))
}

/// GET /games/{id}/revisions
///
/// Revision history for a game, most recent first. Staff only.
pub async fn list_revisions(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    // 404 for unknown games rather than an empty history.
    find_game(&state, id).await?;

    let revisions = RevisionRepo::list_for_game(&state.pool, id).await?;
    Ok(Json(DataResponse { data: revisions }))
}

// ---------------------------------------------------------------------------
// Write handlers
// ---------------------------------------------------------------------------

/// POST /games
///
/// Submit a new game. Any authenticated user; the game starts with all
/// schedule fields null and a `"Form Submission - New"` revision.
pub async fn create_game(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateGame>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let convention = ConventionRepo::current(&state.pool).await?;
    let game = GameRepo::create(&state.pool, convention.id, auth.user_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        game_id = game.id,
        title = %game.title,
        "Game submitted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: game })))
}

/// PUT /games/{id}
///
/// Edit a game's content fields. Only the submitting user may edit their
/// own game; the save records a `"Form Submission - <diff> Changed"`
/// revision and never touches `last_scheduled`.
pub async fn update_game(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGame>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let game = find_game(&state, id).await?;
    if game.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the submitting user may edit this game".into(),
        )));
    }

    let (game, revision) =
        GameRepo::update_content(&state.pool, &game, &input, auth.user_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        game_id = game.id,
        comment = %revision.comment,
        "Game content updated"
    );

    Ok(Json(DataResponse { data: game }))
}

async fn find_game(state: &AppState, id: DbId) -> AppResult<Game> {
    GameRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Game", id }))
}
