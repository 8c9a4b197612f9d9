//! Handlers for the community calendar (`/site-events`).

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use site_core::types::Timestamp;
use site_core::validation::require_text;
use site_db::models::site_event::{CreateSiteEvent, SiteEvent};
use site_db::repositories::SiteEventRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSiteEventBody {
    pub title: String,
    /// RFC 3339 start time.
    pub date: Timestamp,
    pub location: String,
    #[serde(default)]
    pub description: String,
}

/// GET /api/v1/site-events
///
/// Events that have not started yet, soonest first.
pub async fn list_upcoming(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<SiteEvent>>>> {
    let events = SiteEventRepo::list_upcoming(&state.pool, Utc::now(), params.limit()).await?;
    Ok(Json(DataResponse { data: events }))
}

/// POST /api/v1/admin/site-events
pub async fn create_event(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateSiteEventBody>,
) -> AppResult<(StatusCode, Json<DataResponse<SiteEvent>>)> {
    let dto = CreateSiteEvent {
        title: require_text("title", &input.title)?,
        date: input.date,
        location: require_text("location", &input.location)?,
        description: input.description.trim().to_string(),
    };
    let event = SiteEventRepo::create(&state.pool, &dto).await?;
    tracing::info!(event_id = event.id, date = %event.date, "Site event scheduled");
    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}
