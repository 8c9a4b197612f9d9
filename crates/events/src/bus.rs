//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! Handlers publish a [`SiteEvent`] after every successful write to a table
//! that clients watch. WebSocket connections subscribe and relay matching
//! events to their peers.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use site_core::types::{DbId, Timestamp};
use tokio::sync::broadcast;

/// Names of the tables that publish change events.
pub mod tables {
    pub const GUESTS: &str = "guests";
    pub const PARKING_SPOTS: &str = "parking_spots";
    pub const EMERGENCY_ALERTS: &str = "emergency_alerts";
    pub const ANNOUNCEMENTS: &str = "announcements";
    pub const SERVICE_REQUESTS: &str = "service_requests";
    pub const SERVICE_LOGS: &str = "service_logs";
    pub const STAFF_LOCATIONS: &str = "staff_locations";

    pub const ALL: &[&str] = &[
        GUESTS,
        PARKING_SPOTS,
        EMERGENCY_ALERTS,
        ANNOUNCEMENTS,
        SERVICE_REQUESTS,
        SERVICE_LOGS,
        STAFF_LOCATIONS,
    ];

    pub fn is_known(table: &str) -> bool {
        ALL.contains(&table)
    }
}

// ---------------------------------------------------------------------------
// SiteEvent
// ---------------------------------------------------------------------------

/// Kind of row change, spelled the way Postgres logical replication does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RowChange {
    Insert,
    Update,
    Delete,
}

/// One row-level change on a watched table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteEvent {
    pub table: String,
    pub change: RowChange,
    pub record_id: DbId,
    /// User whose request caused the change.
    pub actor_user_id: Option<DbId>,
    /// The row after the change (before, for deletes).
    pub record: serde_json::Value,
    pub timestamp: Timestamp,
}

impl SiteEvent {
    pub fn new(table: impl Into<String>, change: RowChange, record_id: DbId) -> Self {
        Self {
            table: table.into(),
            change,
            record_id,
            actor_user_id: None,
            record: serde_json::Value::Null,
            timestamp: Utc::now(),
        }
    }

    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    /// Attach the serialized row.
    ///
    /// A row that fails to serialize is logged and left as `null`; the event
    /// still announces that the row changed.
    pub fn with_record<T: Serialize>(mut self, row: &T) -> Self {
        match serde_json::to_value(row) {
            Ok(value) => self.record = value,
            Err(e) => {
                tracing::warn!(error = %e, table = %self.table, "Failed to serialize event record");
            }
        }
        self
    }

    pub fn inserted<T: Serialize>(table: &str, record_id: DbId, row: &T) -> Self {
        Self::new(table, RowChange::Insert, record_id).with_record(row)
    }

    pub fn updated<T: Serialize>(table: &str, record_id: DbId, row: &T) -> Self {
        Self::new(table, RowChange::Update, record_id).with_record(row)
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus, shared as `Arc<EventBus>`.
///
/// ```rust
/// use site_events::{EventBus, RowChange, SiteEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(SiteEvent::new("parking_spots", RowChange::Update, 7));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<SiteEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest unread events are dropped and slow
    /// receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: SiteEvent) {
        // A send error only means nobody is listening.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SiteEvent> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let event = SiteEvent::updated(
            tables::PARKING_SPOTS,
            42,
            &serde_json::json!({"id": 42, "is_occupied": true}),
        )
        .with_actor(7);
        bus.publish(event);

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.table, "parking_spots");
        assert_eq!(received.change, RowChange::Update);
        assert_eq!(received.record_id, 42);
        assert_eq!(received.actor_user_id, Some(7));
        assert_eq!(received.record["is_occupied"], true);
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.receiver_count(), 2);

        bus.publish(SiteEvent::new(tables::GUESTS, RowChange::Insert, 1));

        assert_eq!(rx1.recv().await.unwrap().table, "guests");
        assert_eq!(rx2.recv().await.unwrap().table, "guests");
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.publish(SiteEvent::new(tables::GUESTS, RowChange::Delete, 1));
    }

    #[test]
    fn change_kind_uses_upper_case() {
        assert_eq!(serde_json::to_string(&RowChange::Insert).unwrap(), "\"INSERT\"");
        let parsed: RowChange = serde_json::from_str("\"UPDATE\"").unwrap();
        assert_eq!(parsed, RowChange::Update);
    }

    #[test]
    fn bare_event_has_null_record() {
        let event = SiteEvent::new(tables::EMERGENCY_ALERTS, RowChange::Insert, 3);
        assert!(event.record.is_null());
        assert!(event.actor_user_id.is_none());
    }

    #[test]
    fn only_watched_tables_are_known() {
        assert!(tables::is_known("parking_spots"));
        assert!(tables::is_known("staff_locations"));
        assert!(!tables::is_known("profiles"));
    }
}
