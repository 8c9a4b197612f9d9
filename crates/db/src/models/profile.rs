//! Resident and staff profile model and DTOs.

use serde::{Deserialize, Serialize};
use site_core::status::UserRole;
use site_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full row from the `profiles` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`ProfileResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    #[sqlx(try_from = "String")]
    pub role: UserRole,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub block_no: Option<String>,
    pub apartment_no: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe profile representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub role: UserRole,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub block_no: Option<String>,
    pub apartment_no: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            email: p.email,
            full_name: p.full_name,
            avatar_url: p.avatar_url,
            role: p.role,
            phone: p.phone,
            address: p.address,
            block_no: p.block_no,
            apartment_no: p.apartment_no,
            is_active: p.is_active,
            created_at: p.created_at,
        }
    }
}

/// DTO for creating a new profile.
#[derive(Debug)]
pub struct CreateProfile {
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub block_no: Option<String>,
    pub apartment_no: Option<String>,
}

/// DTO for updating a profile. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfile {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub block_no: Option<String>,
    pub apartment_no: Option<String>,
    pub role: Option<UserRole>,
}
