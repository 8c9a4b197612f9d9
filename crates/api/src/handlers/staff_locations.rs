//! Handlers for `/staff-locations`.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use site_core::service::validate_coordinates;
use site_core::staff_location::freshness_cutoff;
use site_core::types::{DbId, Timestamp};
use site_db::models::staff_location::StaffLocation;
use site_db::repositories::StaffLocationRepo;
use site_events::{tables, SiteEvent};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireFieldStaff;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LocationUpdate {
    pub latitude: f64,
    pub longitude: f64,
}

/// The reported position as stored; also the payload of the realtime event.
#[derive(Debug, Serialize)]
pub struct StaffPosition {
    pub user_id: DbId,
    pub latitude: f64,
    pub longitude: f64,
    pub updated_at: Timestamp,
}

/// PUT /api/v1/staff-locations/me
///
/// Residents watching `staff_locations` re-fetch the fresh list on each
/// update, so every report is published.
pub async fn report_location(
    State(state): State<AppState>,
    RequireFieldStaff(staff): RequireFieldStaff,
    Json(input): Json<LocationUpdate>,
) -> AppResult<Json<DataResponse<StaffPosition>>> {
    validate_coordinates(input.latitude, input.longitude)?;
    let updated_at =
        StaffLocationRepo::upsert(&state.pool, staff.user_id, input.latitude, input.longitude)
            .await?;
    tracing::debug!(user_id = staff.user_id, "Staff location updated");

    let position = StaffPosition {
        user_id: staff.user_id,
        latitude: input.latitude,
        longitude: input.longitude,
        updated_at,
    };
    state.publish(
        SiteEvent::updated(tables::STAFF_LOCATIONS, staff.user_id, &position)
            .with_actor(staff.user_id),
    );
    Ok(Json(DataResponse { data: position }))
}

/// GET /api/v1/staff-locations
///
/// Only positions reported within the freshness window.
pub async fn list_fresh(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<StaffLocation>>>> {
    let locations = StaffLocationRepo::list_fresh(&state.pool, freshness_cutoff(Utc::now())).await?;
    Ok(Json(DataResponse { data: locations }))
}
