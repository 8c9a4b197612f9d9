//! Handlers for `/reservations` (shared facility booking).

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use site_core::error::CoreError;
use site_core::reservation::{validate_slot_request, FACILITIES, TIME_SLOTS};
use site_db::models::reservation::{CreateReservation, Reservation};
use site_db::repositories::ReservationRepo;

use crate::error::{unique_violation, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SlotParams {
    pub facility_name: String,
    pub date: String,
    pub time_slot: String,
}

#[derive(Debug, Serialize)]
pub struct Availability {
    pub available: bool,
}

/// Facilities and slots a client can offer.
#[derive(Debug, Serialize)]
pub struct BookingOptions {
    pub facilities: &'static [&'static str],
    pub time_slots: &'static [&'static str],
}

/// GET /api/v1/reservations/options
pub async fn options(_auth: AuthUser) -> Json<DataResponse<BookingOptions>> {
    Json(DataResponse {
        data: BookingOptions {
            facilities: FACILITIES,
            time_slots: TIME_SLOTS,
        },
    })
}

/// GET /api/v1/reservations/availability?facility_name=&date=&time_slot=
pub async fn availability(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<SlotParams>,
) -> AppResult<Json<DataResponse<Availability>>> {
    let slot = validate_slot_request(&params.facility_name, &params.date, &params.time_slot)?;
    let available =
        ReservationRepo::is_available(&state.pool, &slot.facility_name, slot.date, &slot.time_slot)
            .await?;
    Ok(Json(DataResponse {
        data: Availability { available },
    }))
}

/// POST /api/v1/reservations
///
/// The unique slot constraint decides between concurrent bookings.
pub async fn create_reservation(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<SlotParams>,
) -> AppResult<(StatusCode, Json<DataResponse<Reservation>>)> {
    let slot = validate_slot_request(&input.facility_name, &input.date, &input.time_slot)?;
    let dto = CreateReservation {
        user_id: auth.user_id,
        facility_name: slot.facility_name,
        date: slot.date,
        time_slot: slot.time_slot,
    };

    match ReservationRepo::create(&state.pool, &dto).await {
        Ok(reservation) => {
            tracing::info!(
                reservation_id = reservation.id,
                facility = %reservation.facility_name,
                date = %reservation.date,
                slot = %reservation.time_slot,
                "Facility booked"
            );
            Ok((StatusCode::CREATED, Json(DataResponse { data: reservation })))
        }
        Err(e) if unique_violation(&e) == Some("uq_reservations_slot") => Err(AppError::Core(
            CoreError::Conflict("This time slot is already booked".into()),
        )),
        Err(e) => Err(e.into()),
    }
}

/// GET /api/v1/reservations/mine
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Reservation>>>> {
    let reservations = ReservationRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: reservations }))
}
