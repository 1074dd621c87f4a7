//! Shared response envelope types for API handlers.
//!
//! Mutation and lookup endpoints use a `{ "data": ... }` envelope. The
//! scheduler read endpoint is the exception: its payload shape is a wire
//! contract with the grid renderer and is serialized bare (see
//! `handlers::scheduler::SchedulePayload`).

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
