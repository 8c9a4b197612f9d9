//! Handlers for emergency alerts.
//!
//! Raising an alert publishes an `emergency_alerts` INSERT event; every
//! client subscribed to that table shows the overlay and reads it aloud.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use site_core::emergency::validate_alert;
use site_core::error::CoreError;
use site_core::types::DbId;
use site_db::models::emergency_alert::EmergencyAlert;
use site_db::repositories::EmergencyAlertRepo;
use site_events::{tables, SiteEvent};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RaiseAlertBody {
    #[serde(rename = "type")]
    pub alert_type: String,
    pub message: String,
}

/// GET /api/v1/emergency-alerts/active
pub async fn list_active(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<EmergencyAlert>>>> {
    let alerts = EmergencyAlertRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: alerts }))
}

/// POST /api/v1/admin/emergency-alerts
pub async fn raise_alert(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<RaiseAlertBody>,
) -> AppResult<(StatusCode, Json<DataResponse<EmergencyAlert>>)> {
    let alert_type = input.alert_type.trim().to_lowercase();
    let message = validate_alert(&alert_type, &input.message)?;

    let alert = EmergencyAlertRepo::create(&state.pool, &alert_type, &message).await?;
    tracing::warn!(
        alert_id = alert.id,
        alert_type = %alert.alert_type,
        admin_id = admin.user_id,
        "Emergency alert raised"
    );
    state.publish(
        SiteEvent::inserted(tables::EMERGENCY_ALERTS, alert.id, &alert).with_actor(admin.user_id),
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: alert })))
}

/// POST /api/v1/admin/emergency-alerts/{id}/deactivate
pub async fn deactivate_alert(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<EmergencyAlert>>> {
    let alert = EmergencyAlertRepo::deactivate(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "active emergency_alert",
            id,
        }))?;

    tracing::info!(alert_id = id, admin_id = admin.user_id, "Emergency alert cleared");
    state.publish(
        SiteEvent::updated(tables::EMERGENCY_ALERTS, alert.id, &alert).with_actor(admin.user_id),
    );
    Ok(Json(DataResponse { data: alert }))
}
