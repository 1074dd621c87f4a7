use conplan_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `revisions` table. Immutable once created.
///
/// `comment` follows the fixed format
/// `"<prefix> - <comma-joined changed fields> Changed"` (or the literal
/// `"Form Submission - New"` for game creation).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Revision {
    pub id: DbId,
    pub game_id: DbId,
    /// The acting user (staff member or game owner).
    pub user_id: DbId,
    pub comment: String,
    pub before_state: Option<serde_json::Value>,
    pub after_state: Option<serde_json::Value>,
    pub created_at: Timestamp,
}
