//! Scheduler endpoints backing the drag-and-drop schedule grid.
//!
//! The read side serializes the full grid state with index-based entity
//! references; the write side applies a staff-submitted assignment and
//! records an audit revision, both inside one transaction.

use axum::extract::State;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use conplan_core::error::CoreError;
use conplan_core::revision::{self, AJAX_SCHEDULE_PREFIX};
use conplan_core::schedule::{game_start, index_of, slot_width};
use conplan_core::types::DbId;
use conplan_db::models::game::ScheduleAssignment;
use conplan_db::repositories::{ConventionRepo, GameRepo, ScheduleRepo};

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Read payload
// ---------------------------------------------------------------------------

/// Wire format consumed by the client-side grid renderer.
///
/// Games reference locations/blocks/slots by position into the sibling
/// arrays (`-1` when unset), so the arrays must be serialized in exactly
/// the order the indices were computed against: locations and games in
/// persistence order, blocks by `sort_id`, slots by `start`.
#[derive(Debug, Serialize)]
pub struct SchedulePayload {
    pub locations: Vec<LocationEntry>,
    pub games: Vec<GameEntry>,
    pub blocks: Vec<BlockEntry>,
    pub slots: Vec<SlotEntry>,
}

#[derive(Debug, Serialize)]
pub struct LocationEntry {
    pub id: DbId,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct BlockEntry {
    pub id: DbId,
    pub text: String,
    /// Horizontal grid position; see `conplan_core::schedule`.
    pub offset: i32,
}

#[derive(Debug, Serialize)]
pub struct SlotEntry {
    pub id: DbId,
    /// Display label, e.g. `"2 PM - 4 PM"`.
    pub text: String,
    pub start: f64,
    pub width: f64,
}

#[derive(Debug, Serialize)]
pub struct GameEntry {
    pub id: DbId,
    pub title: String,
    pub gm: String,
    pub preferred_time: String,
    pub special_requests: String,
    /// Index into `locations`, or -1.
    pub location: i64,
    /// Index into `blocks`, or -1.
    pub time_block: i64,
    /// Index into `slots`, or -1.
    pub time_slot: i64,
    /// Grid start coordinate (100 when unscheduled).
    pub start: f64,
    pub width: f64,
}

/// GET /schedule
///
/// Serialize the current convention's locations, blocks, slots, and games
/// for the grid renderer. Any authentication state; never mutates.
pub async fn get_schedule(State(state): State<AppState>) -> AppResult<Json<SchedulePayload>> {
    let convention = ConventionRepo::current(&state.pool).await?;

    let locations = ScheduleRepo::locations(&state.pool, convention.id).await?;
    let blocks = ScheduleRepo::blocks(&state.pool).await?;
    let slots = ScheduleRepo::slots(&state.pool).await?;
    let games = GameRepo::list_for_convention(&state.pool, convention.id).await?;

    let location_ids: Vec<DbId> = locations.iter().map(|l| l.id).collect();
    let block_ids: Vec<DbId> = blocks.iter().map(|b| b.id).collect();
    let slot_ids: Vec<DbId> = slots.iter().map(|s| s.id).collect();

    let game_entries = games
        .iter()
        .map(|game| {
            let block_idx = index_of(game.time_block_id.as_ref(), &block_ids);
            let slot_idx = index_of(game.time_slot_id.as_ref(), &slot_ids);

            let block_text = usize::try_from(block_idx)
                .ok()
                .map(|i| blocks[i].text.as_str());
            let slot = usize::try_from(slot_idx)
                .ok()
                .map(|i| (slots[i].start, slots[i].stop));

            GameEntry {
                id: game.id,
                title: game.title.clone(),
                gm: game.gm.clone(),
                preferred_time: game.preferred_time.clone(),
                special_requests: game.special_requests.clone(),
                location: index_of(game.location_id.as_ref(), &location_ids),
                time_block: block_idx,
                time_slot: slot_idx,
                start: game_start(block_text, slot.map(|(start, _)| start)),
                width: slot_width(slot),
            }
        })
        .collect();

    Ok(Json(SchedulePayload {
        locations: locations
            .into_iter()
            .map(|l| LocationEntry {
                id: l.id,
                text: l.text,
            })
            .collect(),
        games: game_entries,
        blocks: blocks
            .into_iter()
            .map(|b| BlockEntry {
                id: b.id,
                offset: conplan_core::schedule::block_offset(&b.text),
                text: b.text,
            })
            .collect(),
        slots: slots
            .into_iter()
            .map(|s| SlotEntry {
                id: s.id,
                text: s.label(),
                start: s.start,
                width: s.width(),
            })
            .collect(),
    }))
}

// ---------------------------------------------------------------------------
// Write endpoint
// ---------------------------------------------------------------------------

/// POST /schedule body: a game id plus its new assignment. Absent or null
/// identifiers clear the corresponding field.
#[derive(Debug, Deserialize)]
pub struct ScheduleSubmission {
    pub id: DbId,
    pub location: Option<DbId>,
    pub time_block: Option<DbId>,
    pub time_slot: Option<DbId>,
}

/// POST /schedule
///
/// Staff-only. Applies the submitted assignment, stamps `last_scheduled`
/// (even when nothing changed), and records a revision naming exactly the
/// fields that changed, all in one transaction.
pub async fn post_schedule(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<ScheduleSubmission>,
) -> AppResult<impl IntoResponse> {
    let game = GameRepo::find_by_id(&state.pool, input.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Game",
            id: input.id,
        }))?;

    let location_id = resolve_location(&state, input.location).await?;
    let time_block_id = resolve_block(&state, input.time_block).await?;
    let time_slot_id = resolve_slot(&state, input.time_slot).await?;

    let mut changed: Vec<String> = Vec::new();
    if game.location_id != location_id {
        changed.push("location".to_string());
    }
    if game.time_block_id != time_block_id {
        changed.push("time_block".to_string());
    }
    if game.time_slot_id != time_slot_id {
        changed.push("time_slot".to_string());
    }
    changed.sort();

    let comment = revision::comment(AJAX_SCHEDULE_PREFIX, &changed);

    let assignment = ScheduleAssignment {
        location_id,
        time_block_id,
        time_slot_id,
    };
    let (game, _revision) =
        GameRepo::reschedule(&state.pool, &game, assignment, &comment, user.user_id).await?;

    tracing::info!(
        user_id = user.user_id,
        game_id = game.id,
        changed = ?changed,
        "Game rescheduled"
    );

    Ok(Json(DataResponse { data: game }))
}

// Each resolver verifies an incoming identifier exists before it is
// written; a stale id from a concurrent admin edit surfaces as 404
// instead of a constraint violation.

async fn resolve_location(state: &AppState, id: Option<DbId>) -> AppResult<Option<DbId>> {
    match id {
        Some(id) => {
            ScheduleRepo::location_by_id(&state.pool, id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Location",
                    id,
                }))?;
            Ok(Some(id))
        }
        None => Ok(None),
    }
}

async fn resolve_block(state: &AppState, id: Option<DbId>) -> AppResult<Option<DbId>> {
    match id {
        Some(id) => {
            ScheduleRepo::block_by_id(&state.pool, id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "TimeBlock",
                    id,
                }))?;
            Ok(Some(id))
        }
        None => Ok(None),
    }
}

async fn resolve_slot(state: &AppState, id: Option<DbId>) -> AppResult<Option<DbId>> {
    match id {
        Some(id) => {
            ScheduleRepo::slot_by_id(&state.pool, id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "TimeSlot",
                    id,
                }))?;
            Ok(Some(id))
        }
        None => Ok(None),
    }
}
