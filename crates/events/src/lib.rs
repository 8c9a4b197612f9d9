//! Realtime row-change events for the site platform.
//!
//! - [`EventBus`] is the in-process fan-out hub backed by
//!   `tokio::sync::broadcast`.
//! - [`SiteEvent`] describes one inserted, updated or deleted row.
//! - [`Subscription`] narrows a bus receiver to one [`TableFilter`].
//! - [`protocol`] defines the JSON frames exchanged over the WebSocket.

pub mod bus;
pub mod protocol;
pub mod subscription;

pub use bus::{tables, EventBus, RowChange, SiteEvent};
pub use protocol::{ClientFrame, ServerFrame};
pub use subscription::{Subscription, TableFilter};
