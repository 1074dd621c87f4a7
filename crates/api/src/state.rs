use std::sync::Arc;

use crate::config::ServerConfig;

/// State shared by every handler through `State<AppState>`.
///
/// Cloned per request; both fields are handle types.
#[derive(Clone)]
pub struct AppState {
    pub pool: conplan_db::DbPool,
    pub config: Arc<ServerConfig>,
}
