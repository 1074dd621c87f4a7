//! Token-based authentication.
//!
//! Login and user management live in the surrounding platform; this
//! module only validates the HS256 bearer tokens it mints (and can mint
//! its own for tests).

pub mod jwt;
