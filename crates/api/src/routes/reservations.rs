//! Route definitions for the `/reservations` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reservations;
use crate::state::AppState;

/// Routes mounted at `/reservations`.
///
/// ```text
/// POST /              -> create_reservation
/// GET  /options       -> options
/// GET  /availability  -> availability
/// GET  /mine          -> list_mine
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(reservations::create_reservation))
        .route("/options", get(reservations::options))
        .route("/availability", get(reservations::availability))
        .route("/mine", get(reservations::list_mine))
}
