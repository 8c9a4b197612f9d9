//! Handlers for `/parking-spots`.
//!
//! Claims and releases are single conditional updates in
//! [`ParkingSpotRepo`]. When the guard fails the handler re-reads the spot
//! and uses the pure rules in [`site_core::parking`] to explain why.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use site_core::error::CoreError;
use site_core::parking::{
    classify, normalize_location_code, plan_claim, plan_release, summarize, OccupancySummary,
    ReleaseRejection, SpotView,
};
use site_core::types::DbId;
use site_db::models::parking_spot::ParkingSpot;
use site_db::repositories::ParkingSpotRepo;
use site_events::{tables, SiteEvent};

use crate::error::{unique_violation, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// A spot plus how it looks to the caller.
#[derive(Debug, Serialize)]
pub struct SpotWithView {
    #[serde(flatten)]
    pub spot: ParkingSpot,
    pub view: SpotView,
}

#[derive(Debug, Deserialize)]
pub struct CreateSpotRequest {
    pub location_code: String,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "parking_spot",
        id,
    })
}

/// GET /api/v1/parking-spots
pub async fn list_spots(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<SpotWithView>>>> {
    let spots = ParkingSpotRepo::list(&state.pool).await?;
    let data = spots
        .into_iter()
        .map(|spot| SpotWithView {
            view: classify(spot.occupancy(), auth.user_id),
            spot,
        })
        .collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/parking-spots/summary
pub async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<OccupancySummary>>> {
    let spots = ParkingSpotRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: summarize(spots.iter().map(ParkingSpot::occupancy), auth.user_id),
    }))
}

/// POST /api/v1/parking-spots/{id}/claim
///
/// Claiming a spot the caller already holds succeeds without change.
pub async fn claim_spot(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ParkingSpot>>> {
    let Some(spot) = ParkingSpotRepo::claim(&state.pool, id, auth.user_id).await? else {
        let current = ParkingSpotRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(spot_id = id, user_id = auth.user_id, "Parking claim rejected");
        return Err(match plan_claim(current.occupancy(), auth.user_id) {
            Err(_) => AppError::Core(CoreError::Conflict(format!(
                "Parking spot {} is occupied by another user",
                current.location_code
            ))),
            // Freed between the update and the re-read.
            Ok(_) => AppError::Core(CoreError::Conflict(format!(
                "Parking spot {} changed, try again",
                current.location_code
            ))),
        });
    };

    tracing::info!(
        spot_id = id,
        location = %spot.location_code,
        user_id = auth.user_id,
        "Parking spot claimed"
    );
    state.publish(
        SiteEvent::updated(tables::PARKING_SPOTS, spot.id, &spot).with_actor(auth.user_id),
    );
    Ok(Json(DataResponse { data: spot }))
}

/// POST /api/v1/parking-spots/{id}/release
///
/// Only the occupant may release a spot.
pub async fn release_spot(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ParkingSpot>>> {
    let Some(spot) = ParkingSpotRepo::release(&state.pool, id, auth.user_id).await? else {
        let current = ParkingSpotRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(spot_id = id, user_id = auth.user_id, "Parking release rejected");
        return Err(match plan_release(current.occupancy(), auth.user_id) {
            Err(ReleaseRejection::NotOccupied) => AppError::Core(CoreError::Conflict(format!(
                "Parking spot {} is not occupied",
                current.location_code
            ))),
            Err(ReleaseRejection::NotOccupant) => AppError::Core(CoreError::Forbidden(
                "Only the occupant can release this spot".into(),
            )),
            Ok(_) => AppError::Core(CoreError::Conflict(format!(
                "Parking spot {} changed, try again",
                current.location_code
            ))),
        });
    };

    tracing::info!(
        spot_id = id,
        location = %spot.location_code,
        user_id = auth.user_id,
        "Parking spot released"
    );
    state.publish(
        SiteEvent::updated(tables::PARKING_SPOTS, spot.id, &spot).with_actor(auth.user_id),
    );
    Ok(Json(DataResponse { data: spot }))
}

/// POST /api/v1/admin/parking-spots
pub async fn create_spot(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateSpotRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ParkingSpot>>)> {
    let code = normalize_location_code(&input.location_code).ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "location_code must not be empty".into(),
        ))
    })?;

    let spot = match ParkingSpotRepo::create(&state.pool, &code).await {
        Ok(spot) => spot,
        Err(e) if unique_violation(&e) == Some("uq_parking_spots_location_code") => {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Parking spot {code} already exists"
            ))));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(spot_id = spot.id, location = %spot.location_code, "Parking spot provisioned");
    state.publish(
        SiteEvent::inserted(tables::PARKING_SPOTS, spot.id, &spot).with_actor(admin.user_id),
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: spot })))
}
