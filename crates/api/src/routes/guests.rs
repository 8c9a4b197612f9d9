//! Route definitions for guest passes and the gate.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{gate, guests};
use crate::state::AppState;

/// Routes mounted at `/guests`.
///
/// ```text
/// GET  /                -> list_guests (scoped by role)
/// POST /                -> create_guest
/// POST /{id}/check-out  -> check_out (gate operators)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(guests::list_guests).post(guests::create_guest))
        .route("/{id}/check-out", post(guests::check_out))
}

/// Routes mounted at `/gate`. Gate operators only.
///
/// ```text
/// GET  /queue    -> queue
/// POST /resolve  -> resolve (scan or manual token entry)
/// ```
pub fn gate_router() -> Router<AppState> {
    Router::new()
        .route("/queue", get(gate::queue))
        .route("/resolve", post(gate::resolve))
}
