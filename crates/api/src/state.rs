use std::sync::Arc;

use workshop_core::inventory::PartCatalog;

use crate::config::ServerConfig;
use crate::notifications::NotificationDispatcher;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: workshop_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Live WebSocket connections, keyed by connection id.
    pub ws_manager: Arc<WsManager>,
    /// Persists notifications and publishes them on the event bus.
    pub notifier: NotificationDispatcher,
    /// Spare-parts catalog backend.
    pub catalog: Arc<dyn PartCatalog>,
}
