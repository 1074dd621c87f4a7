//! HTTP handlers, one module per surface.

pub mod games;
pub mod scheduler;
