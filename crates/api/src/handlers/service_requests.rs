//! Handlers for support tickets (`/service-requests`).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use site_core::error::CoreError;
use site_core::service::{validate_description, validate_status_change};
use site_core::status::{ServiceRequestCategory, ServiceRequestStatus};
use site_core::types::DbId;
use site_db::models::service_request::{
    CreateServiceRequest, ServiceRequest, ServiceRequestFilter,
};
use site_db::repositories::ServiceRequestRepo;
use site_events::{tables, SiteEvent};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateServiceRequestBody {
    pub category: ServiceRequestCategory,
    pub description: String,
}

/// `?status=pending,in_progress&category=cleaning`
#[derive(Debug, Deserialize)]
pub struct ServiceRequestListParams {
    pub status: Option<String>,
    pub category: Option<ServiceRequestCategory>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    pub status: ServiceRequestStatus,
}

/// Parse a comma-separated status list. Absent means open tickets.
fn parse_statuses(raw: Option<&str>) -> Result<Vec<ServiceRequestStatus>, CoreError> {
    match raw {
        None => Ok(ServiceRequestStatus::OPEN.to_vec()),
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<ServiceRequestStatus>)
            .collect(),
    }
}

/// POST /api/v1/service-requests
pub async fn create_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateServiceRequestBody>,
) -> AppResult<(StatusCode, Json<DataResponse<ServiceRequest>>)> {
    let dto = CreateServiceRequest {
        user_id: auth.user_id,
        category: input.category,
        description: validate_description(&input.description)?,
    };
    let request = ServiceRequestRepo::create(&state.pool, &dto).await?;

    tracing::info!(request_id = request.id, category = %request.category, "Service request opened");
    state.publish(
        SiteEvent::inserted(tables::SERVICE_REQUESTS, request.id, &request)
            .with_actor(auth.user_id),
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// GET /api/v1/service-requests/mine
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<ServiceRequest>>>> {
    let requests = ServiceRequestRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /api/v1/service-requests
pub async fn list_requests(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(params): Query<ServiceRequestListParams>,
) -> AppResult<Json<DataResponse<Vec<ServiceRequest>>>> {
    let filter = ServiceRequestFilter {
        statuses: parse_statuses(params.status.as_deref())?,
        category: params.category,
    };
    let requests = ServiceRequestRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// PUT /api/v1/service-requests/{id}/status
///
/// Tickets only move forward.
pub async fn update_status(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStatusBody>,
) -> AppResult<Json<DataResponse<ServiceRequest>>> {
    let current = ServiceRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "service_request",
            id,
        }))?;
    validate_status_change(current.status, input.status)?;

    let updated = ServiceRequestRepo::update_status(&state.pool, id, current.status, input.status)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Service request was updated by someone else, reload and retry".into(),
            ))
        })?;

    tracing::info!(
        request_id = id,
        from = %current.status,
        to = %updated.status,
        staff_id = staff.user_id,
        "Service request status changed"
    );
    state.publish(
        SiteEvent::updated(tables::SERVICE_REQUESTS, updated.id, &updated)
            .with_actor(staff.user_id),
    );
    Ok(Json(DataResponse { data: updated }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_status_means_open_tickets() {
        assert_eq!(
            parse_statuses(None).unwrap(),
            vec![ServiceRequestStatus::Pending, ServiceRequestStatus::InProgress]
        );
    }

    #[test]
    fn status_list_is_parsed() {
        assert_eq!(
            parse_statuses(Some("resolved, pending")).unwrap(),
            vec![ServiceRequestStatus::Resolved, ServiceRequestStatus::Pending]
        );
        assert!(parse_statuses(Some("done")).is_err());
    }

    #[test]
    fn empty_status_list_means_any() {
        assert!(parse_statuses(Some("")).unwrap().is_empty());
    }
}
