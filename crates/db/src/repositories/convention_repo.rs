//! Repository for the `conventions` table.

use sqlx::PgPool;

use crate::models::convention::Convention;
use crate::DbError;

const COLUMNS: &str = "\
    id, name, date, registration_opens, max_attendees, is_current, created_at";

pub struct ConventionRepo;

impl ConventionRepo {
    /// Resolve the current convention.
    ///
    /// Exactly one row must have `is_current = true`; zero or multiple
    /// rows is a deployment fault and fails fast rather than guessing.
    pub async fn current(pool: &PgPool) -> Result<Convention, DbError> {
        let query = format!("SELECT {COLUMNS} FROM conventions WHERE is_current = true");
        let mut rows = sqlx::query_as::<_, Convention>(&query)
            .fetch_all(pool)
            .await?;

        match rows.len() {
            1 => Ok(rows.remove(0)),
            0 => Err(DbError::Configuration(
                "No convention is marked current".into(),
            )),
            n => Err(DbError::Configuration(format!(
                "{n} conventions are marked current, cannot determine which one to use"
            ))),
        }
    }
}
