//! Repository for schedule reference data: locations, time blocks, time
//! slots.
//!
//! The list methods return rows in the orders the scheduler payload
//! serializes them in; index-based references are computed against these
//! same orders.

use conplan_core::types::DbId;
use sqlx::PgPool;

use crate::models::schedule::{Location, TimeBlock, TimeSlot};

const LOCATION_COLUMNS: &str = "id, convention_id, text";
const BLOCK_COLUMNS: &str = "id, text, sort_id";
const SLOT_COLUMNS: &str = "id, start, stop";

pub struct ScheduleRepo;

impl ScheduleRepo {
    /// List a convention's locations in persistence order.
    pub async fn locations(pool: &PgPool, convention_id: DbId) -> Result<Vec<Location>, sqlx::Error> {
        let query =
            format!("SELECT {LOCATION_COLUMNS} FROM locations WHERE convention_id = $1 ORDER BY id");
        sqlx::query_as::<_, Location>(&query)
            .bind(convention_id)
            .fetch_all(pool)
            .await
    }

    /// List all time blocks by display order.
    pub async fn blocks(pool: &PgPool) -> Result<Vec<TimeBlock>, sqlx::Error> {
        let query = format!("SELECT {BLOCK_COLUMNS} FROM time_blocks ORDER BY sort_id");
        sqlx::query_as::<_, TimeBlock>(&query).fetch_all(pool).await
    }

    /// List all time slots by start hour.
    pub async fn slots(pool: &PgPool) -> Result<Vec<TimeSlot>, sqlx::Error> {
        let query = format!("SELECT {SLOT_COLUMNS} FROM time_slots ORDER BY start");
        sqlx::query_as::<_, TimeSlot>(&query).fetch_all(pool).await
    }

    pub async fn location_by_id(pool: &PgPool, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {LOCATION_COLUMNS} FROM locations WHERE id = $1");
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn block_by_id(pool: &PgPool, id: DbId) -> Result<Option<TimeBlock>, sqlx::Error> {
        let query = format!("SELECT {BLOCK_COLUMNS} FROM time_blocks WHERE id = $1");
        sqlx::query_as::<_, TimeBlock>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn slot_by_id(pool: &PgPool, id: DbId) -> Result<Option<TimeSlot>, sqlx::Error> {
        let query = format!("SELECT {SLOT_COLUMNS} FROM time_slots WHERE id = $1");
        sqlx::query_as::<_, TimeSlot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
