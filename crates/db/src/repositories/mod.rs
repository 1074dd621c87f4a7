//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` (or a transaction connection) as the first
//! argument.

pub mod convention_repo;
pub mod game_repo;
pub mod revision_repo;
pub mod schedule_repo;

pub use convention_repo::ConventionRepo;
pub use game_repo::GameRepo;
pub use revision_repo::RevisionRepo;
pub use schedule_repo::ScheduleRepo;
