use std::sync::Arc;

use crate::config::ServerConfig;
use crate::uploads::ImageHost;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: haven_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Image-hosting client, present when the account is configured.
    pub image_host: Option<Arc<ImageHost>>,
}
