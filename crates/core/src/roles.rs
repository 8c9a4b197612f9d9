//! Well-known role name constants and role-based capability checks.
//!
//! These must match the `CHECK` constraint on `profiles.role`.

use crate::status::UserRole;

pub const ROLE_RESIDENT: &str = "resident";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CLEANER: &str = "cleaner";
pub const ROLE_SECURITY: &str = "security";

/// Security staff and admins may resolve guest tokens at the gate.
pub fn can_operate_gate(role: &str) -> bool {
    role == ROLE_SECURITY || role == ROLE_ADMIN
}

/// Security staff and admins see every guest; everyone else sees their own.
pub fn sees_all_guests(role: &str) -> bool {
    can_operate_gate(role)
}

/// Staff roles handle service requests and publish their live location.
pub fn is_staff(role: &str) -> bool {
    matches!(role, ROLE_ADMIN | ROLE_CLEANER | ROLE_SECURITY)
}

/// Staff roles that appear on the residents' live staff map.
pub fn is_field_staff(role: &str) -> bool {
    role == ROLE_CLEANER || role == ROLE_SECURITY
}

impl UserRole {
    /// `true` for [`UserRole::Admin`].
    pub fn is_admin(self) -> bool {
        self == UserRole::Admin
    }
}
