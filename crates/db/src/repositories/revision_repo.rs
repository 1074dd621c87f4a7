//! Repository for the `revisions` audit trail.
//!
//! [`RevisionRepo::record`] is the shared audited-save wrapper: it diffs
//! two entity snapshots, formats the comment, and inserts the revision.
//! Callers that compute their own changed-field list (the scheduler write
//! path) use [`RevisionRepo::insert`] with a prebuilt comment.

use conplan_core::revision::{comment, diff_fields};
use conplan_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::revision::Revision;

const COLUMNS: &str = "\
    id, game_id, user_id, comment, before_state, after_state, created_at";

pub struct RevisionRepo;

impl RevisionRepo {
    /// Insert a revision row. Runs on the caller's connection so it can
    /// join the transaction that persists the entity change.
    pub async fn insert(
        conn: &mut PgConnection,
        game_id: DbId,
        user_id: DbId,
        revision_comment: &str,
        before: Option<&serde_json::Value>,
        after: Option<&serde_json::Value>,
    ) -> Result<Revision, sqlx::Error> {
        let query = format!(
            "INSERT INTO revisions (game_id, user_id, comment, before_state, after_state) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Revision>(&query)
            .bind(game_id)
            .bind(user_id)
            .bind(revision_comment)
            .bind(before)
            .bind(after)
            .fetch_one(conn)
            .await
    }

    /// Record an audited save: diff the before/after snapshots (skipping
    /// `ignore`d field names), format the comment from `prefix`, and
    /// insert the revision.
    pub async fn record(
        conn: &mut PgConnection,
        game_id: DbId,
        user_id: DbId,
        prefix: &str,
        before: &serde_json::Value,
        after: &serde_json::Value,
        ignore: &[&str],
    ) -> Result<Revision, sqlx::Error> {
        let changed = diff_fields(before, after, ignore);
        let revision_comment = comment(prefix, &changed);
        Self::insert(
            conn,
            game_id,
            user_id,
            &revision_comment,
            Some(before),
            Some(after),
        )
        .await
    }

    /// Revision history for a game, most recent first.
    pub async fn list_for_game(pool: &PgPool, game_id: DbId) -> Result<Vec<Revision>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM revisions WHERE game_id = $1 ORDER BY id DESC");
        sqlx::query_as::<_, Revision>(&query)
            .bind(game_id)
            .fetch_all(pool)
            .await
    }
}
