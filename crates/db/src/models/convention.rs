use conplan_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `conventions` table.
///
/// Exactly one convention must be marked current at any time; the lookup
/// in `ConventionRepo::current` enforces that invariant.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Convention {
    pub id: DbId,
    pub name: String,
    pub date: Option<chrono::NaiveDate>,
    pub registration_opens: Option<Timestamp>,
    pub max_attendees: i32,
    pub is_current: bool,
    pub created_at: Timestamp,
}
