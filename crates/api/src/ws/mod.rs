//! Realtime relay over WebSocket.
//!
//! Each authenticated connection keeps a set of table subscriptions and
//! receives the matching row changes published on the event bus.

mod handler;
mod heartbeat;
pub mod manager;
pub mod subscriptions;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
pub use subscriptions::SubscriptionSet;
