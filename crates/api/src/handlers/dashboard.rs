//! Admin dashboard counters.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use site_db::models::dashboard::DashboardStats;
use site_db::repositories::{DashboardRepo, GuestRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/dashboard
///
/// The three counts are independent and run concurrently.
pub async fn stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let today = Utc::now().date_naive();
    let (total_users, pending_requests, guests_today) = tokio::try_join!(
        DashboardRepo::total_users(&state.pool),
        DashboardRepo::pending_requests(&state.pool),
        GuestRepo::count_for_date(&state.pool, today),
    )?;

    Ok(Json(DataResponse {
        data: DashboardStats {
            total_users,
            pending_requests,
            guests_today,
        },
    }))
}
