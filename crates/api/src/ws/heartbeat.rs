use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::ws::manager::WsManager;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Ping every realtime subscriber on a fixed interval so idle gate and
/// parking screens keep their sockets open. Stops when the handle is
/// aborted.
pub fn start_heartbeat(ws_manager: Arc<WsManager>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(HEARTBEAT_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            if ws_manager.connection_count().await == 0 {
                continue;
            }
            let pruned = ws_manager.ping_all().await;
            if pruned > 0 {
                tracing::debug!(pruned, "Dropped stale realtime connections");
            }
        }
    })
}
