use std::sync::Arc;

use site_events::{EventBus, SiteEvent};

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone; everything heavy sits behind `Arc` or is a pool handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: site_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Connected realtime clients.
    pub ws_manager: Arc<WsManager>,
    /// Row-change events relayed to realtime subscribers.
    pub event_bus: Arc<EventBus>,
}

impl AppState {
    pub fn publish(&self, event: SiteEvent) {
        tracing::debug!(
            table = %event.table,
            change = ?event.change,
            record_id = event.record_id,
            "Publishing row change"
        );
        self.event_bus.publish(event);
    }
}
