use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use site_core::error::CoreError;
use site_events::ServerFrame;
use tokio::sync::broadcast;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::ws::subscriptions::SubscriptionSet;

/// Browsers cannot set headers on a WebSocket handshake, so the access
/// token travels in the query string.
#[derive(Debug, Deserialize)]
pub struct WsParams {
    pub token: Option<String>,
}

/// GET /api/v1/ws?token=<jwt>
///
/// Authenticates before upgrading; an invalid token gets a plain 401.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(params): Query<WsParams>,
) -> Response {
    let claims = match params
        .token
        .as_deref()
        .map(|token| validate_token(token, &state.config.jwt))
    {
        Some(Ok(claims)) => claims,
        Some(Err(_)) => {
            return AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
                .into_response()
        }
        None => {
            return AppError::Core(CoreError::Unauthorized("Missing token parameter".into()))
                .into_response()
        }
    };

    let user = AuthUser::from(claims);
    ws.on_upgrade(move |socket| handle_socket(socket, state, user))
}

/// Serialize a frame into a text message.
fn frame_message(frame: &ServerFrame) -> Option<Message> {
    match serde_json::to_string(frame) {
        Ok(json) => Some(Message::Text(json.into())),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize WebSocket frame");
            None
        }
    }
}

/// Drive one connection: a sink task drains the manager channel while this
/// task multiplexes inbound frames with bus events.
async fn handle_socket(socket: WebSocket, state: AppState, user: AuthUser) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    let ws_manager = state.ws_manager.clone();

    let mut rx = ws_manager.add(conn_id.clone(), user.user_id).await;
    let user_connections = ws_manager.count_for_user(user.user_id).await;
    tracing::info!(
        conn_id = %conn_id,
        user_id = user.user_id,
        user_connections,
        "WebSocket connected"
    );

    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    let mut subscriptions = SubscriptionSet::new(user.user_id, user.role);
    let mut events = state.event_bus.subscribe();

    loop {
        tokio::select! {
            inbound = stream.next() => match inbound {
                Some(Ok(Message::Text(text))) => {
                    let reply = subscriptions.handle_text(text.as_str());
                    tracing::debug!(
                        conn_id = %conn_id,
                        subscriptions = subscriptions.len(),
                        "Subscription frame handled"
                    );
                    if let Some(msg) = frame_message(&reply) {
                        if !ws_manager.send(&conn_id, msg).await {
                            break;
                        }
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(Message::Pong(_))) => {
                    tracing::trace!(conn_id = %conn_id, "Pong received");
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                    break;
                }
            },
            event = events.recv() => match event {
                Ok(event) if subscriptions.wants(&event) => {
                    let frame = ServerFrame::Change(event);
                    if let Some(msg) = frame_message(&frame) {
                        if !ws_manager.send(&conn_id, msg).await {
                            break;
                        }
                    }
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(conn_id = %conn_id, skipped = n, "Realtime relay lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }

    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, user_id = user.user_id, "WebSocket disconnected");
}
