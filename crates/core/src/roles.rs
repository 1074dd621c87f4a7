//! Well-known role name constants.
//!
//! These must match the `role` claim minted by the surrounding auth
//! platform.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STAFF: &str = "staff";
pub const ROLE_ATTENDEE: &str = "attendee";

/// Whether a role is allowed to modify the master game schedule.
pub fn is_staff(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_STAFF
}
