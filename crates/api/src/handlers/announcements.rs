//! Handlers for `/announcements`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use site_core::error::CoreError;
use site_core::status::AnnouncementPriority;
use site_core::types::DbId;
use site_core::validation::{parse_iso_date, require_text};
use site_db::models::announcement::{Announcement, CreateAnnouncement};
use site_db::repositories::AnnouncementRepo;
use site_events::{tables, RowChange, SiteEvent};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub content: String,
    /// `YYYY-MM-DD`; defaults to today.
    pub date: Option<String>,
    pub priority: Option<AnnouncementPriority>,
}

/// GET /api/v1/announcements
pub async fn list_announcements(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Announcement>>>> {
    let announcements = AnnouncementRepo::list(&state.pool, params.limit()).await?;
    Ok(Json(DataResponse {
        data: announcements,
    }))
}

/// POST /api/v1/admin/announcements
pub async fn create_announcement(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateAnnouncementRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Announcement>>)> {
    let date = input
        .date
        .as_deref()
        .map(|d| parse_iso_date("date", d))
        .transpose()?;
    let dto = CreateAnnouncement {
        title: require_text("title", &input.title)?,
        content: require_text("content", &input.content)?,
        date,
        priority: input.priority.unwrap_or(AnnouncementPriority::Low),
    };

    let announcement = AnnouncementRepo::create(&state.pool, &dto).await?;
    tracing::info!(
        announcement_id = announcement.id,
        priority = %announcement.priority,
        "Announcement posted"
    );
    state.publish(
        SiteEvent::inserted(tables::ANNOUNCEMENTS, announcement.id, &announcement)
            .with_actor(admin.user_id),
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: announcement })))
}

/// DELETE /api/v1/admin/announcements/{id}
pub async fn delete_announcement(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !AnnouncementRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "announcement",
            id,
        }));
    }
    state.publish(
        SiteEvent::new(tables::ANNOUNCEMENTS, RowChange::Delete, id).with_actor(admin.user_id),
    );
    Ok(StatusCode::NO_CONTENT)
}
