//! JSON frames exchanged over the realtime WebSocket.
//!
//! Clients send [`ClientFrame`]s to manage their subscriptions; the server
//! answers with [`ServerFrame`]s. Every frame carries a `type` tag.

use serde::{Deserialize, Serialize};

use crate::bus::SiteEvent;
use crate::subscription::TableFilter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    /// `{"type":"subscribe","table":"parking_spots","change":"UPDATE"}`
    Subscribe(TableFilter),
    /// `{"type":"unsubscribe","table":"parking_spots"}`
    Unsubscribe { table: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    Subscribed { table: String },
    Unsubscribed { table: String },
    Change(SiteEvent),
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::RowChange;

    #[test]
    fn subscribe_frame_parses_with_and_without_change() {
        let raw = r#"{"type":"subscribe","table":"parking_spots","change":"UPDATE"}"#;
        let frame: ClientFrame = serde_json::from_str(raw).unwrap();
        assert_eq!(
            frame,
            ClientFrame::Subscribe(
                TableFilter::table("parking_spots").with_change(RowChange::Update)
            )
        );

        let frame: ClientFrame =
            serde_json::from_str(r#"{"type":"subscribe","table":"emergency_alerts"}"#).unwrap();
        assert_eq!(frame, ClientFrame::Subscribe(TableFilter::table("emergency_alerts")));
    }

    #[test]
    fn change_frame_flattens_the_event() {
        let event = SiteEvent::new("guests", RowChange::Insert, 9);
        let json = serde_json::to_value(ServerFrame::Change(event)).unwrap();
        assert_eq!(json["type"], "change");
        assert_eq!(json["table"], "guests");
        assert_eq!(json["change"], "INSERT");
        assert_eq!(json["record_id"], 9);
    }

    #[test]
    fn unknown_frame_type_is_rejected() {
        assert!(serde_json::from_str::<ClientFrame>(r#"{"type":"hello"}"#).is_err());
    }
}
