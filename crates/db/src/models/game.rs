//! Game entity models and DTOs.

use conplan_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `games` table.
///
/// A game is scheduled iff both `time_block_id` and `time_slot_id` are
/// set; `location_id` may independently be null. `last_scheduled` is
/// stamped only by the scheduler write path, never by content edits.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Game {
    pub id: DbId,
    pub convention_id: DbId,
    pub title: String,
    pub gm: String,
    pub number_players: String,
    pub game_length: String,
    pub system: String,
    pub triggers: String,
    pub description: String,
    pub preferred_time: String,
    pub special_requests: String,
    /// Submitting user; only this user may edit the game's content.
    pub user_id: DbId,
    pub location_id: Option<DbId>,
    pub time_block_id: Option<DbId>,
    pub time_slot_id: Option<DbId>,
    pub last_modified: Timestamp,
    pub last_scheduled: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Game {
    pub fn is_scheduled(&self) -> bool {
        self.time_block_id.is_some() && self.time_slot_id.is_some()
    }
}

/// DTO for submitting a new game via `POST /api/v1/games`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGame {
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    #[validate(length(min = 1, max = 256))]
    pub gm: String,
    #[validate(length(max = 32))]
    pub number_players: String,
    #[validate(length(max = 64))]
    pub game_length: String,
    #[validate(length(max = 256))]
    pub system: String,
    #[validate(length(max = 256))]
    pub triggers: String,
    pub description: String,
    #[validate(length(max = 256))]
    pub preferred_time: Option<String>,
    #[validate(length(max = 256))]
    pub special_requests: Option<String>,
}

/// DTO for editing a game's content fields via `PUT /api/v1/games/{id}`.
///
/// Schedule fields are deliberately absent; those change only through the
/// scheduler endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateGame {
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    #[validate(length(min = 1, max = 256))]
    pub gm: String,
    #[validate(length(max = 32))]
    pub number_players: String,
    #[validate(length(max = 64))]
    pub game_length: String,
    #[validate(length(max = 256))]
    pub system: String,
    #[validate(length(max = 256))]
    pub triggers: String,
    pub description: String,
    #[validate(length(max = 256))]
    pub preferred_time: Option<String>,
    #[validate(length(max = 256))]
    pub special_requests: Option<String>,
}

/// New schedule assignment for a game, with `None` meaning "clear".
#[derive(Debug, Clone, Copy)]
pub struct ScheduleAssignment {
    pub location_id: Option<DbId>,
    pub time_block_id: Option<DbId>,
    pub time_slot_id: Option<DbId>,
}
