//! Admin dashboard aggregates.

use serde::Serialize;

/// Headline counts on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DashboardStats {
    pub total_users: i64,
    pub pending_requests: i64,
    pub guests_today: i64,
}
