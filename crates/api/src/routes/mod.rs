pub mod admin;
pub mod auth;
pub mod community;
pub mod guests;
pub mod health;
pub mod parking;
pub mod reservations;
pub mod service;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws?token=                                   realtime row changes (WebSocket)
///
/// /auth/login                                  login (public)
/// /auth/refresh                                refresh (public)
/// /auth/logout                                 logout
/// /auth/me                                     current profile
///
/// /admin/profiles                              list, create (admin only)
/// /admin/profiles/{id}                         update, deactivate
/// /admin/dashboard                             headline counters
/// /admin/parking-spots                         create spot
/// /admin/announcements                         publish
/// /admin/announcements/{id}                    delete
/// /admin/emergency-alerts                      raise alert
/// /admin/emergency-alerts/{id}/deactivate      clear alert
/// /admin/transactions                          post ledger entry
/// /admin/site-events                           schedule event
///
/// /guests                                      list (role scoped), register
/// /guests/{id}/check-out                       check out (gate operators)
/// /gate/queue                                  expected + inside guests
/// /gate/resolve                                scan or manual token entry
///
/// /parking-spots                               list with occupancy view
/// /parking-spots/summary                       occupancy counters
/// /parking-spots/{id}/claim                    claim for current user
/// /parking-spots/{id}/release                  release own spot
///
/// /reservations                                book a slot
/// /reservations/options                        facilities and time slots
/// /reservations/availability                   is a slot free
/// /reservations/mine                           own bookings
///
/// /service-requests                            list (staff), create
/// /service-requests/mine                       own requests
/// /service-requests/{id}/status                move through workflow (staff)
/// /service-logs                                record a task
/// /service-logs/pending                        open tasks (staff)
/// /service-logs/{id}/complete                  finish own task
///
/// /staff-locations                             fresh positions
/// /staff-locations/me                          report position (field staff)
///
/// /announcements                               list
/// /marketplace                                 list, create
/// /marketplace/{id}/sold                       mark sold (seller)
/// /site-events                                 upcoming events
/// /finance/mine                                own ledger and balance
/// /emergency-alerts/active                     currently active alerts
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Realtime relay.
        .route("/ws", get(ws::ws_handler))
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        // Guest passes and gate operations.
        .nest("/guests", guests::router())
        .nest("/gate", guests::gate_router())
        .nest("/parking-spots", parking::router())
        .nest("/reservations", reservations::router())
        .nest("/service-requests", service::requests_router())
        .nest("/service-logs", service::logs_router())
        .nest("/staff-locations", community::staff_locations_router())
        .nest("/announcements", community::announcements_router())
        .nest("/marketplace", community::marketplace_router())
        .nest("/site-events", community::site_events_router())
        .nest("/finance", community::finance_router())
        .nest("/emergency-alerts", community::emergency_router())
}
