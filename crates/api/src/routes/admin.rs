//! Route definitions for the `/admin` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{admin, announcements, dashboard, emergency, finance, parking, site_events};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET    /profiles                         -> list_profiles
/// POST   /profiles                         -> create_profile
/// PUT    /profiles/{id}                    -> update_profile
/// DELETE /profiles/{id}                    -> deactivate_profile
/// GET    /dashboard                        -> stats
/// POST   /parking-spots                    -> create_spot
/// POST   /announcements                    -> create_announcement
/// DELETE /announcements/{id}               -> delete_announcement
/// POST   /emergency-alerts                 -> raise_alert
/// POST   /emergency-alerts/{id}/deactivate -> deactivate_alert
/// POST   /transactions                     -> create_transaction
/// POST   /site-events                      -> create_event
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/profiles",
            get(admin::list_profiles).post(admin::create_profile),
        )
        .route(
            "/profiles/{id}",
            put(admin::update_profile).delete(admin::deactivate_profile),
        )
        .route("/dashboard", get(dashboard::stats))
        .route("/parking-spots", post(parking::create_spot))
        .route("/announcements", post(announcements::create_announcement))
        .route(
            "/announcements/{id}",
            delete(announcements::delete_announcement),
        )
        .route("/emergency-alerts", post(emergency::raise_alert))
        .route(
            "/emergency-alerts/{id}/deactivate",
            post(emergency::deactivate_alert),
        )
        .route("/transactions", post(finance::create_transaction))
        .route("/site-events", post(site_events::create_event))
}
