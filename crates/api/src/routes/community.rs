//! Route definitions for resident-facing community resources.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{
    announcements, emergency, finance, marketplace, site_events, staff_locations,
};
use crate::state::AppState;

/// Routes mounted at `/announcements`.
pub fn announcements_router() -> Router<AppState> {
    Router::new().route("/", get(announcements::list_announcements))
}

/// Routes mounted at `/marketplace`.
///
/// ```text
/// GET  /           -> list_items
/// POST /           -> create_item
/// POST /{id}/sold  -> mark_sold (seller only)
/// ```
pub fn marketplace_router() -> Router<AppState> {
    Router::new()
        .route("/", get(marketplace::list_items).post(marketplace::create_item))
        .route("/{id}/sold", post(marketplace::mark_sold))
}

/// Routes mounted at `/site-events`.
pub fn site_events_router() -> Router<AppState> {
    Router::new().route("/", get(site_events::list_upcoming))
}

/// Routes mounted at `/finance`.
pub fn finance_router() -> Router<AppState> {
    Router::new().route("/mine", get(finance::my_ledger))
}

/// Routes mounted at `/emergency-alerts`.
pub fn emergency_router() -> Router<AppState> {
    Router::new().route("/active", get(emergency::list_active))
}

/// Routes mounted at `/staff-locations`.
///
/// ```text
/// GET /     -> list_fresh
/// PUT /me   -> report_location (field staff)
/// ```
pub fn staff_locations_router() -> Router<AppState> {
    Router::new()
        .route("/", get(staff_locations::list_fresh))
        .route("/me", put(staff_locations::report_location))
}
