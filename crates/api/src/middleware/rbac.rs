//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects callers whose role is not
//! allowed with 403 Forbidden.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use site_core::error::CoreError;
use site_core::roles::{can_operate_gate, is_field_staff, is_staff};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Reject `user` unless `allowed` holds for its role.
fn require(user: &AuthUser, allowed: fn(&str) -> bool, message: &str) -> Result<(), AppError> {
    if allowed(user.role.as_str()) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(message.into())))
    }
}

/// Requires the `admin` role.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.is_admin() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `security` or `admin`: the roles that run the gate.
pub struct RequireGateOperator(pub AuthUser);

impl FromRequestParts<AppState> for RequireGateOperator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        require(&user, can_operate_gate, "Security or Admin role required")?;
        Ok(RequireGateOperator(user))
    }
}

/// Requires any staff role (`admin`, `cleaner`, `security`).
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        require(&user, is_staff, "Staff role required")?;
        Ok(RequireStaff(user))
    }
}

/// Requires `cleaner` or `security`, the staff who move around the site.
pub struct RequireFieldStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireFieldStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        require(&user, is_field_staff, "Cleaner or Security role required")?;
        Ok(RequireFieldStaff(user))
    }
}
