//! Entity models and DTOs, one module per table group.

pub mod convention;
pub mod game;
pub mod revision;
pub mod schedule;
