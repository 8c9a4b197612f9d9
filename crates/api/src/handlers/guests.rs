//! Handlers for `/guests`: residents register visitors, gate staff check
//! them out.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use site_core::error::CoreError;
use site_core::guest_pass::{
    evaluate_check_out, generate_token, validate_new_guest, MAX_TOKEN_ATTEMPTS,
};
use site_core::roles::sees_all_guests;
use site_core::status::GuestStatus;
use site_core::types::DbId;
use site_db::models::guest::{CreateGuest, Guest};
use site_db::repositories::GuestRepo;
use site_events::{tables, SiteEvent};

use crate::error::{unique_violation, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireGateOperator;
use crate::response::DataResponse;
use crate::state::AppState;

const TOKEN_CONSTRAINT: &str = "uq_guests_qr_token";

#[derive(Debug, Deserialize)]
pub struct CreateGuestRequest {
    pub full_name: String,
    pub plate_number: Option<String>,
    /// `YYYY-MM-DD`.
    pub visit_date: String,
}

/// POST /api/v1/guests
///
/// Registers a visitor for the caller and returns the pass with its access
/// token. A token collision is retried with a fresh token a bounded number
/// of times.
pub async fn create_guest(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateGuestRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Guest>>)> {
    let new_guest = validate_new_guest(
        &input.full_name,
        input.plate_number.as_deref(),
        &input.visit_date,
    )?;

    for attempt in 1..=MAX_TOKEN_ATTEMPTS {
        let dto = CreateGuest {
            user_id: auth.user_id,
            full_name: new_guest.full_name.clone(),
            plate_number: new_guest.plate_number.clone(),
            visit_date: new_guest.visit_date,
            qr_token: generate_token(),
        };
        match GuestRepo::create(&state.pool, &dto).await {
            Ok(guest) => {
                tracing::info!(
                    guest_id = guest.id,
                    user_id = auth.user_id,
                    visit_date = %guest.visit_date,
                    "Guest pass created"
                );
                state.publish(
                    SiteEvent::inserted(tables::GUESTS, guest.id, &guest).with_actor(auth.user_id),
                );
                return Ok((StatusCode::CREATED, Json(DataResponse { data: guest })));
            }
            Err(e) if unique_violation(&e) == Some(TOKEN_CONSTRAINT) => {
                tracing::warn!(attempt, "Guest token collision, regenerating");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(AppError::InternalError(format!(
        "Could not generate a unique guest token after {MAX_TOKEN_ATTEMPTS} attempts"
    )))
}

/// GET /api/v1/guests
///
/// Gate staff see every pass; everyone else sees their own.
pub async fn list_guests(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Guest>>>> {
    let guests = if sees_all_guests(auth.role.as_str()) {
        GuestRepo::list_all(&state.pool).await?
    } else {
        GuestRepo::list_for_user(&state.pool, auth.user_id).await?
    };
    Ok(Json(DataResponse { data: guests }))
}

/// POST /api/v1/guests/{id}/check-out
pub async fn check_out(
    State(state): State<AppState>,
    RequireGateOperator(operator): RequireGateOperator,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Guest>>> {
    let guest = GuestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "guest", id }))?;

    evaluate_check_out(guest.status)?;

    let guest =
        GuestRepo::advance_status(&state.pool, id, GuestStatus::Arrived, GuestStatus::Departed)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Conflict(
                    "Guest status changed while checking out".into(),
                ))
            })?;

    tracing::info!(guest_id = id, operator_id = operator.user_id, "Guest checked out");
    state.publish(
        SiteEvent::updated(tables::GUESTS, guest.id, &guest).with_actor(operator.user_id),
    );
    Ok(Json(DataResponse { data: guest }))
}
