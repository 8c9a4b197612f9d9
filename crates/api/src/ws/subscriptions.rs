//! Per-connection subscription state for the realtime relay.

use std::collections::HashMap;

use site_core::roles;
use site_core::status::UserRole;
use site_core::types::DbId;
use site_events::{tables, ClientFrame, ServerFrame, SiteEvent, TableFilter};

/// The tables a connection listens to, plus who is listening.
///
/// At most one filter per table; subscribing again replaces it.
#[derive(Debug)]
pub struct SubscriptionSet {
    user_id: DbId,
    role: UserRole,
    filters: HashMap<String, TableFilter>,
}

impl SubscriptionSet {
    pub fn new(user_id: DbId, role: UserRole) -> Self {
        Self {
            user_id,
            role,
            filters: HashMap::new(),
        }
    }

    /// Parse and apply one inbound text frame, returning the reply.
    pub fn handle_text(&mut self, text: &str) -> ServerFrame {
        match serde_json::from_str::<ClientFrame>(text) {
            Ok(frame) => self.apply(frame),
            Err(e) => ServerFrame::Error {
                message: format!("Malformed frame: {e}"),
            },
        }
    }

    pub fn apply(&mut self, frame: ClientFrame) -> ServerFrame {
        match frame {
            ClientFrame::Subscribe(filter) => {
                if !tables::is_known(&filter.table) {
                    return ServerFrame::Error {
                        message: format!("Unknown table '{}'", filter.table),
                    };
                }
                let table = filter.table.clone();
                self.filters.insert(table.clone(), filter);
                ServerFrame::Subscribed { table }
            }
            ClientFrame::Unsubscribe { table } => {
                if self.filters.remove(&table).is_none() {
                    return ServerFrame::Error {
                        message: format!("Not subscribed to '{table}'"),
                    };
                }
                ServerFrame::Unsubscribed { table }
            }
        }
    }

    /// Whether `event` should be relayed to this connection.
    pub fn wants(&self, event: &SiteEvent) -> bool {
        self.filters
            .get(&event.table)
            .is_some_and(|filter| filter.matches(event))
            && self.can_see(event)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Owner-scoped tables only leak rows to their owner unless the
    /// viewer's role already lists every row over HTTP.
    fn can_see(&self, event: &SiteEvent) -> bool {
        let role = self.role.as_str();
        let sees_all = match event.table.as_str() {
            tables::GUESTS => roles::sees_all_guests(role),
            tables::SERVICE_REQUESTS | tables::SERVICE_LOGS => roles::is_staff(role),
            _ => true,
        };
        sees_all || self.owns(event)
    }

    fn owns(&self, event: &SiteEvent) -> bool {
        event
            .record
            .get(owner_column(&event.table))
            .and_then(serde_json::Value::as_i64)
            == Some(self.user_id)
    }
}

/// Column naming the profile a row belongs to.
fn owner_column(table: &str) -> &'static str {
    match table {
        tables::SERVICE_LOGS => "resident_id",
        _ => "user_id",
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;
    use site_events::RowChange;

    use super::*;

    fn guest_event(owner: DbId) -> SiteEvent {
        SiteEvent::inserted(tables::GUESTS, 1, &json!({"id": 1, "user_id": owner}))
    }

    #[test]
    fn subscribe_then_unsubscribe() {
        let mut set = SubscriptionSet::new(1, UserRole::Resident);

        let reply = set.handle_text(r#"{"type":"subscribe","table":"parking_spots"}"#);
        assert_matches!(reply, ServerFrame::Subscribed { table } if table == "parking_spots");
        assert_eq!(set.len(), 1);

        let reply = set.handle_text(r#"{"type":"unsubscribe","table":"parking_spots"}"#);
        assert_matches!(reply, ServerFrame::Unsubscribed { .. });
        assert!(set.is_empty());
    }

    #[test]
    fn bad_frames_get_error_replies() {
        let mut set = SubscriptionSet::new(1, UserRole::Resident);

        assert_matches!(set.handle_text("not json"), ServerFrame::Error { .. });
        assert_matches!(
            set.handle_text(r#"{"type":"subscribe","table":"profiles"}"#),
            ServerFrame::Error { message } if message.contains("profiles")
        );
        assert_matches!(
            set.handle_text(r#"{"type":"unsubscribe","table":"guests"}"#),
            ServerFrame::Error { .. }
        );
    }

    #[test]
    fn resubscribing_replaces_the_change_filter() {
        let mut set = SubscriptionSet::new(1, UserRole::Resident);
        set.apply(ClientFrame::Subscribe(
            TableFilter::table(tables::PARKING_SPOTS).with_change(RowChange::Insert),
        ));
        set.apply(ClientFrame::Subscribe(
            TableFilter::table(tables::PARKING_SPOTS).with_change(RowChange::Update),
        ));

        let update = SiteEvent::new(tables::PARKING_SPOTS, RowChange::Update, 4);
        let insert = SiteEvent::new(tables::PARKING_SPOTS, RowChange::Insert, 4);
        assert_eq!(set.len(), 1);
        assert!(set.wants(&update));
        assert!(!set.wants(&insert));
    }

    #[test]
    fn unsubscribed_tables_are_not_relayed() {
        let set = SubscriptionSet::new(1, UserRole::Admin);
        assert!(!set.wants(&SiteEvent::new(tables::EMERGENCY_ALERTS, RowChange::Insert, 1)));
    }

    #[test]
    fn residents_only_see_their_own_guests() {
        let mut set = SubscriptionSet::new(5, UserRole::Resident);
        set.apply(ClientFrame::Subscribe(TableFilter::table(tables::GUESTS)));

        assert!(set.wants(&guest_event(5)));
        assert!(!set.wants(&guest_event(6)));
    }

    #[test]
    fn gate_staff_see_every_guest() {
        let mut set = SubscriptionSet::new(9, UserRole::Security);
        set.apply(ClientFrame::Subscribe(TableFilter::table(tables::GUESTS)));

        assert!(set.wants(&guest_event(5)));
        assert!(set.wants(&guest_event(6)));
    }

    #[test]
    fn service_requests_are_scoped_for_residents() {
        let mut resident = SubscriptionSet::new(5, UserRole::Resident);
        let mut cleaner = SubscriptionSet::new(8, UserRole::Cleaner);
        let filter = TableFilter::table(tables::SERVICE_REQUESTS);
        resident.apply(ClientFrame::Subscribe(filter.clone()));
        cleaner.apply(ClientFrame::Subscribe(filter));

        let event =
            SiteEvent::updated(tables::SERVICE_REQUESTS, 3, &json!({"id": 3, "user_id": 6}));
        assert!(!resident.wants(&event));
        assert!(cleaner.wants(&event));
    }

    #[test]
    fn residents_follow_their_own_cleaning_logs() {
        let mut resident = SubscriptionSet::new(5, UserRole::Resident);
        resident.apply(ClientFrame::Subscribe(TableFilter::table(tables::SERVICE_LOGS)));

        let own = SiteEvent::updated(
            tables::SERVICE_LOGS,
            3,
            &json!({"id": 3, "resident_id": 5, "staff_id": 8, "status": "completed"}),
        );
        let neighbour = SiteEvent::inserted(
            tables::SERVICE_LOGS,
            4,
            &json!({"id": 4, "resident_id": 6, "staff_id": null, "status": "pending"}),
        );
        assert!(resident.wants(&own));
        assert!(!resident.wants(&neighbour));
    }

    #[test]
    fn staff_positions_reach_residents() {
        let mut set = SubscriptionSet::new(5, UserRole::Resident);
        set.apply(ClientFrame::Subscribe(TableFilter::table(tables::STAFF_LOCATIONS)));
        let moved = SiteEvent::updated(
            tables::STAFF_LOCATIONS,
            8,
            &json!({"user_id": 8, "latitude": 41.0, "longitude": 29.0}),
        );
        assert!(set.wants(&moved));
    }

    #[test]
    fn public_tables_reach_everyone() {
        let mut set = SubscriptionSet::new(5, UserRole::Resident);
        set.apply(ClientFrame::Subscribe(TableFilter::table(tables::EMERGENCY_ALERTS)));
        let alert = SiteEvent::inserted(
            tables::EMERGENCY_ALERTS,
            2,
            &json!({"id": 2, "type": "fire", "message": "Evacuate", "active": true}),
        );
        assert!(set.wants(&alert));
    }
}
