//! Realtime subscriptions over the API's WebSocket relay.
//!
//! Each [`RealtimeClient::subscribe`] call runs its own background task with
//! its own socket. The task reconnects after a fixed delay until the
//! returned [`SubscriptionHandle`] is unsubscribed or dropped.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use site_events::{ClientFrame, ServerFrame, SiteEvent, TableFilter};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use crate::error::ClientError;

/// Pause between reconnect attempts.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(5);

pub struct RealtimeClient {
    ws_url: String,
    access_token: String,
}

/// Keeps a subscription alive. Dropping it tears the subscription down.
pub struct SubscriptionHandle {
    filter: TableFilter,
    cancel: CancellationToken,
}

impl SubscriptionHandle {
    pub fn filter(&self) -> &TableFilter {
        &self.filter
    }

    pub fn is_active(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl RealtimeClient {
    /// `ws_url` is the relay endpoint, e.g. `ws://host:3000/api/v1/ws`.
    pub fn new(ws_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            ws_url: ws_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Start delivering events matching `filter` to `callback`.
    ///
    /// Must be called within a tokio runtime.
    pub fn subscribe<F>(&self, filter: TableFilter, callback: F) -> SubscriptionHandle
    where
        F: FnMut(SiteEvent) + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let url = connect_url(&self.ws_url, &self.access_token);
        tokio::spawn(run_subscription(
            url,
            filter.clone(),
            callback,
            cancel.clone(),
        ));
        SubscriptionHandle { filter, cancel }
    }
}

fn connect_url(ws_url: &str, token: &str) -> String {
    let separator = if ws_url.contains('?') { '&' } else { '?' };
    format!("{ws_url}{separator}token={token}")
}

async fn run_subscription<F>(
    url: String,
    filter: TableFilter,
    mut callback: F,
    cancel: CancellationToken,
) where
    F: FnMut(SiteEvent) + Send + 'static,
{
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            result = stream_events(&url, &filter, &mut callback) => match result {
                Ok(()) => {
                    tracing::info!(table = %filter.table, "Realtime connection closed by server")
                }
                Err(e) => {
                    tracing::warn!(table = %filter.table, error = %e, "Realtime connection failed")
                }
            },
        }

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(RECONNECT_DELAY) => {}
        }
        tracing::debug!(table = %filter.table, "Reconnecting realtime subscription");
    }
    tracing::debug!(table = %filter.table, "Realtime subscription stopped");
}

/// One connection's lifetime: connect, subscribe, relay until the socket
/// ends.
async fn stream_events<F>(
    url: &str,
    filter: &TableFilter,
    callback: &mut F,
) -> Result<(), ClientError>
where
    F: FnMut(SiteEvent),
{
    let (mut socket, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::WebSocket(format!("connect failed: {e}")))?;

    let subscribe = serde_json::to_string(&ClientFrame::Subscribe(filter.clone()))
        .map_err(|e| ClientError::WebSocket(format!("encode subscribe frame: {e}")))?;
    socket
        .send(Message::Text(subscribe))
        .await
        .map_err(|e| ClientError::WebSocket(e.to_string()))?;

    while let Some(message) = socket.next().await {
        let message = message.map_err(|e| ClientError::WebSocket(e.to_string()))?;
        match message {
            Message::Text(text) => match parse_frame(&text) {
                Some(ServerFrame::Change(event)) => callback(event),
                Some(ServerFrame::Subscribed { table }) => {
                    tracing::info!(table = %table, "Realtime subscription confirmed");
                }
                Some(ServerFrame::Error { message }) => {
                    tracing::warn!(
                        table = %filter.table,
                        message = %message,
                        "Realtime relay error"
                    );
                }
                Some(ServerFrame::Unsubscribed { .. }) | None => {}
            },
            Message::Close(_) => break,
            _ => {}
        }
    }
    Ok(())
}

/// Decode a server frame, logging and dropping anything unrecognised.
pub fn parse_frame(text: &str) -> Option<ServerFrame> {
    match serde_json::from_str(text) {
        Ok(frame) => Some(frame),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring unrecognised realtime frame");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use site_events::{tables, RowChange};

    use super::*;

    #[test]
    fn token_is_appended_to_the_url() {
        assert_eq!(
            connect_url("ws://localhost:3000/api/v1/ws", "abc"),
            "ws://localhost:3000/api/v1/ws?token=abc"
        );
        assert_eq!(connect_url("ws://h/ws?x=1", "abc"), "ws://h/ws?x=1&token=abc");
    }

    #[test]
    fn change_frames_decode_to_events() {
        let text = r#"{"type":"change","table":"parking_spots","change":"UPDATE","record_id":4,
            "actor_user_id":7,"record":{"id":4},"timestamp":"2024-12-25T10:00:00Z"}"#;
        let frame = parse_frame(text);
        assert_matches!(frame, Some(ServerFrame::Change(event)) => {
            assert_eq!(event.table, tables::PARKING_SPOTS);
            assert_eq!(event.change, RowChange::Update);
            assert_eq!(event.actor_user_id, Some(7));
        });
    }

    #[test]
    fn garbage_frames_are_dropped() {
        assert!(parse_frame("pong").is_none());
        assert!(parse_frame(r#"{"type":"mystery"}"#).is_none());
    }

    #[tokio::test]
    async fn dropping_the_handle_cancels() {
        // Nothing listens on port 1; the task sits in its reconnect delay.
        let client = RealtimeClient::new("ws://127.0.0.1:1/api/v1/ws", "token");
        let handle = client.subscribe(TableFilter::table(tables::EMERGENCY_ALERTS), |_| {});
        let cancel = handle.cancel.clone();

        assert!(handle.is_active());
        handle.unsubscribe();
        assert!(cancel.is_cancelled());
    }
}
