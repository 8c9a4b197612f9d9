//! Handlers for on-site service logs (`/service-logs`): residents call a
//! cleaner to their door, cleaners work through the pending list.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use site_core::error::CoreError;
use site_core::service::{validate_coordinates, validate_log_completion};
use site_core::status::ServiceLogKind;
use site_core::types::DbId;
use site_db::models::service_log::{CreateServiceLog, ServiceLog, ServiceLogTask};
use site_db::repositories::ServiceLogRepo;
use site_events::{tables, SiteEvent};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateServiceLogBody {
    #[serde(rename = "type")]
    pub kind: ServiceLogKind,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Coordinates are optional but come as a pair.
fn check_location(latitude: Option<f64>, longitude: Option<f64>) -> Result<(), CoreError> {
    match (latitude, longitude) {
        (None, None) => Ok(()),
        (Some(lat), Some(lng)) => validate_coordinates(lat, lng),
        _ => Err(CoreError::Validation(
            "latitude and longitude must be given together".into(),
        )),
    }
}

/// POST /api/v1/service-logs
pub async fn create_log(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateServiceLogBody>,
) -> AppResult<(StatusCode, Json<DataResponse<ServiceLog>>)> {
    check_location(input.latitude, input.longitude)?;
    let dto = CreateServiceLog {
        resident_id: auth.user_id,
        kind: input.kind,
        latitude: input.latitude,
        longitude: input.longitude,
    };
    let log = ServiceLogRepo::create(&state.pool, &dto).await?;

    tracing::info!(log_id = log.id, kind = %log.kind, "Service log requested");
    state.publish(SiteEvent::inserted(tables::SERVICE_LOGS, log.id, &log).with_actor(auth.user_id));
    Ok((StatusCode::CREATED, Json(DataResponse { data: log })))
}

/// GET /api/v1/service-logs/pending
pub async fn list_pending(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<DataResponse<Vec<ServiceLogTask>>>> {
    let tasks = ServiceLogRepo::list_pending_tasks(&state.pool).await?;
    Ok(Json(DataResponse { data: tasks }))
}

/// POST /api/v1/service-logs/{id}/complete
pub async fn complete_log(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ServiceLog>>> {
    let log = ServiceLogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "service_log",
            id,
        }))?;
    validate_log_completion(log.status)?;

    let log = ServiceLogRepo::complete(&state.pool, id, staff.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Service log is already completed".into(),
            ))
        })?;

    tracing::info!(log_id = id, staff_id = staff.user_id, "Service log completed");
    state.publish(SiteEvent::updated(tables::SERVICE_LOGS, log.id, &log).with_actor(staff.user_id));
    Ok(Json(DataResponse { data: log }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_come_in_pairs() {
        assert!(check_location(None, None).is_ok());
        assert!(check_location(Some(41.0), Some(29.0)).is_ok());
        assert!(check_location(Some(41.0), None).is_err());
        assert!(check_location(Some(100.0), Some(29.0)).is_err());
    }
}
