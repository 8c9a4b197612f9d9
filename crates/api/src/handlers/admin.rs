//! Handlers for `/admin/profiles` (user management).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use site_core::error::CoreError;
use site_core::status::UserRole;
use site_core::types::DbId;
use site_core::validation::{optional_text, require_text};
use site_db::models::profile::{CreateProfile, ProfileResponse, UpdateProfile};
use site_db::repositories::{ProfileRepo, SessionRepo};

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{unique_violation, AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub block_no: Option<String>,
    pub apartment_no: Option<String>,
}

/// POST /api/v1/admin/profiles
pub async fn create_profile(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateProfileRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ProfileResponse>>)> {
    let email = require_text("email", &input.email)?;
    let full_name = require_text("full_name", &input.full_name)?;
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let dto = CreateProfile {
        email,
        password_hash,
        full_name,
        role: input.role,
        phone: optional_text(input.phone.as_deref()),
        block_no: optional_text(input.block_no.as_deref()),
        apartment_no: optional_text(input.apartment_no.as_deref()),
    };

    let profile = match ProfileRepo::create(&state.pool, &dto).await {
        Ok(profile) => profile,
        Err(e) if unique_violation(&e) == Some("uq_profiles_email") => {
            return Err(AppError::Core(CoreError::Conflict(
                "A profile with this email already exists".into(),
            )));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        admin_id = admin.user_id,
        user_id = profile.id,
        role = %profile.role,
        "Profile created"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: profile.into(),
        }),
    ))
}

/// GET /api/v1/admin/profiles
pub async fn list_profiles(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<ProfileResponse>>>> {
    let profiles = ProfileRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: profiles.into_iter().map(ProfileResponse::from).collect(),
    }))
}

/// PUT /api/v1/admin/profiles/{id}
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    if let Some(name) = &input.full_name {
        require_text("full_name", name)?;
    }
    let profile = ProfileRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "profile",
            id,
        }))?;

    tracing::info!(admin_id = admin.user_id, user_id = id, "Profile updated");
    Ok(Json(DataResponse {
        data: profile.into(),
    }))
}

/// DELETE /api/v1/admin/profiles/{id}
///
/// Deactivates the profile and revokes its sessions.
pub async fn deactivate_profile(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::BadRequest(
            "Admins cannot deactivate their own account".into(),
        ));
    }
    if !ProfileRepo::deactivate(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "profile",
            id,
        }));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    tracing::info!(admin_id = admin.user_id, user_id = id, "Profile deactivated");
    Ok(StatusCode::NO_CONTENT)
}
