//! Domain logic for the convention planner backend.
//!
//! This crate has zero internal deps so the db/API layers and any future
//! CLI tooling can share it. It holds the schedule-grid arithmetic, the
//! revision-comment helpers, and the shared error/type aliases.

pub mod error;
pub mod revision;
pub mod roles;
pub mod schedule;
pub mod types;
