//! Repository for the `games` table.
//!
//! Every mutation commits together with its audit revision: either the
//! game row and the revision both persist, or neither does.

use conplan_core::revision::{
    DEFAULT_IGNORED_FIELDS, FORM_SUBMISSION_PREFIX, NEW_GAME_COMMENT,
};
use conplan_core::types::DbId;
use sqlx::PgPool;

use crate::models::game::{CreateGame, Game, ScheduleAssignment, UpdateGame};
use crate::models::revision::Revision;
use crate::repositories::RevisionRepo;
use crate::DbError;

const COLUMNS: &str = "\
    id, convention_id, title, gm, number_players, game_length, system, \
    triggers, description, preferred_time, special_requests, user_id, \
    location_id, time_block_id, time_slot_id, last_modified, \
    last_scheduled, created_at";

pub struct GameRepo;

impl GameRepo {
    /// List a convention's games in persistence order.
    pub async fn list_for_convention(
        pool: &PgPool,
        convention_id: DbId,
    ) -> Result<Vec<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE convention_id = $1 ORDER BY id");
        sqlx::query_as::<_, Game>(&query)
            .bind(convention_id)
            .fetch_all(pool)
            .await
    }

    /// List a convention's games in schedule display order: time block,
    /// then slot, then title, with unscheduled games after scheduled
    /// ones (ascending sort puts nulls last).
    pub async fn list_for_schedule(
        pool: &PgPool,
        convention_id: DbId,
    ) -> Result<Vec<Game>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM games WHERE convention_id = $1 \
             ORDER BY time_block_id, time_slot_id, title"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(convention_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE id = $1");
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a game owned by `user_id` with all schedule fields null,
    /// recording a `"Form Submission - New"` revision.
    pub async fn create(
        pool: &PgPool,
        convention_id: DbId,
        user_id: DbId,
        input: &CreateGame,
    ) -> Result<Game, DbError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO games (convention_id, title, gm, number_players, game_length, \
             system, triggers, description, preferred_time, special_requests, user_id, \
             last_modified) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, now()) \
             RETURNING {COLUMNS}"
        );
        let game = sqlx::query_as::<_, Game>(&query)
            .bind(convention_id)
            .bind(&input.title)
            .bind(&input.gm)
            .bind(&input.number_players)
            .bind(&input.game_length)
            .bind(&input.system)
            .bind(&input.triggers)
            .bind(&input.description)
            .bind(input.preferred_time.as_deref().unwrap_or(""))
            .bind(input.special_requests.as_deref().unwrap_or(""))
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        let after = serde_json::to_value(&game)?;
        RevisionRepo::insert(&mut *tx, game.id, user_id, NEW_GAME_COMMENT, None, Some(&after))
            .await?;

        tx.commit().await?;
        Ok(game)
    }

    /// Update a game's content fields and stamp `last_modified`, recording
    /// a `"Form Submission - <diff> Changed"` revision. `before` is the
    /// row as last read by the caller.
    ///
    /// `last_scheduled` is untouched; schedule changes go through
    /// [`GameRepo::reschedule`].
    pub async fn update_content(
        pool: &PgPool,
        before: &Game,
        input: &UpdateGame,
        actor: DbId,
    ) -> Result<(Game, Revision), DbError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE games \
             SET title = $1, gm = $2, number_players = $3, game_length = $4, \
                 system = $5, triggers = $6, description = $7, \
                 preferred_time = $8, special_requests = $9, \
                 last_modified = now() \
             WHERE id = $10 \
             RETURNING {COLUMNS}"
        );
        let game = sqlx::query_as::<_, Game>(&query)
            .bind(&input.title)
            .bind(&input.gm)
            .bind(&input.number_players)
            .bind(&input.game_length)
            .bind(&input.system)
            .bind(&input.triggers)
            .bind(&input.description)
            .bind(input.preferred_time.as_deref().unwrap_or(""))
            .bind(input.special_requests.as_deref().unwrap_or(""))
            .bind(before.id)
            .fetch_one(&mut *tx)
            .await?;

        let before_state = serde_json::to_value(before)?;
        let after_state = serde_json::to_value(&game)?;
        let revision = RevisionRepo::record(
            &mut *tx,
            game.id,
            actor,
            FORM_SUBMISSION_PREFIX,
            &before_state,
            &after_state,
            DEFAULT_IGNORED_FIELDS,
        )
        .await?;

        tx.commit().await?;
        Ok((game, revision))
    }

    /// Apply a schedule assignment and stamp `last_scheduled`, recording a
    /// revision with the caller-supplied comment.
    ///
    /// All three assignment values are written regardless of whether they
    /// individually changed, and `last_scheduled` is stamped even when the
    /// assignment matches the current state (touch semantics).
    pub async fn reschedule(
        pool: &PgPool,
        before: &Game,
        assignment: ScheduleAssignment,
        comment: &str,
        actor: DbId,
    ) -> Result<(Game, Revision), DbError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE games \
             SET location_id = $1, time_block_id = $2, time_slot_id = $3, \
                 last_scheduled = now() \
             WHERE id = $4 \
             RETURNING {COLUMNS}"
        );
        let game = sqlx::query_as::<_, Game>(&query)
            .bind(assignment.location_id)
            .bind(assignment.time_block_id)
            .bind(assignment.time_slot_id)
            .bind(before.id)
            .fetch_one(&mut *tx)
            .await?;

        let before_state = serde_json::to_value(before)?;
        let after_state = serde_json::to_value(&game)?;
        let revision = RevisionRepo::insert(
            &mut *tx,
            game.id,
            actor,
            comment,
            Some(&before_state),
            Some(&after_state),
        )
        .await?;

        tx.commit().await?;
        Ok((game, revision))
    }
}
