//! Route definitions for service requests and field-staff service logs.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{service_logs, service_requests};
use crate::state::AppState;

/// Routes mounted at `/service-requests`.
///
/// ```text
/// GET  /              -> list_requests (staff)
/// POST /              -> create_request
/// GET  /mine          -> list_mine
/// PUT  /{id}/status   -> update_status (staff)
/// ```
pub fn requests_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(service_requests::list_requests).post(service_requests::create_request),
        )
        .route("/mine", get(service_requests::list_mine))
        .route("/{id}/status", put(service_requests::update_status))
}

/// Routes mounted at `/service-logs`.
///
/// ```text
/// POST /                -> create_log
/// GET  /pending         -> list_pending (staff)
/// POST /{id}/complete   -> complete_log (assigned staff)
/// ```
pub fn logs_router() -> Router<AppState> {
    Router::new()
        .route("/", post(service_logs::create_log))
        .route("/pending", get(service_logs::list_pending))
        .route("/{id}/complete", post(service_logs::complete_log))
}
