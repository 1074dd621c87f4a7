//! Server configuration, read from the environment at startup.

use std::fmt::Debug;
use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

/// Runtime settings for the HTTP server.
///
/// Everything defaults to values usable for local development; deployments
/// override individual settings through the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (`HOST`, default `0.0.0.0`).
    pub host: String,
    /// Bind port (`PORT`, default `3000`).
    pub port: u16,
    /// Allowed CORS origins (`CORS_ORIGINS`, comma-separated).
    pub cors_origins: Vec<String>,
    /// Per-request timeout in seconds (`REQUEST_TIMEOUT_SECS`, default `30`).
    pub request_timeout_secs: u64,
    /// When true, 5xx responses carry the raw error detail instead of the
    /// opaque production message (`DEBUG`, default `false`).
    pub debug: bool,
    /// Token signing/validation settings.
    pub jwt: JwtConfig,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read `key` and parse it, falling back to `default` when unset.
///
/// # Panics
///
/// Panics when the variable is set but unparseable; a typo'd setting
/// should stop the server at startup, not be silently replaced.
fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Debug,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{key} is not valid: {e:?}")),
        Err(_) => default,
    }
}

impl ServerConfig {
    /// Load the full configuration from environment variables.
    pub fn from_env() -> Self {
        let cors_origins = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_parse("PORT", 3000),
            cors_origins,
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", 30),
            debug: env_parse("DEBUG", false),
            jwt: JwtConfig::from_env(),
        }
    }
}
