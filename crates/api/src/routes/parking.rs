//! Route definitions for the `/parking-spots` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::parking;
use crate::state::AppState;

/// Routes mounted at `/parking-spots`.
///
/// ```text
/// GET  /              -> list_spots
/// GET  /summary       -> summary
/// POST /{id}/claim    -> claim_spot
/// POST /{id}/release  -> release_spot
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(parking::list_spots))
        .route("/summary", get(parking::summary))
        .route("/{id}/claim", post(parking::claim_spot))
        .route("/{id}/release", post(parking::release_spot))
}
