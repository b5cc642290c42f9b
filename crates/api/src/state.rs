use std::sync::Arc;

use checkin_db::CheckinStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Event, guest and user storage.
    pub store: Arc<dyn CheckinStore>,
    /// Server configuration (session settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
}
