//! Live staff location model.

use serde::Serialize;
use site_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `staff_locations` table joined with the staff name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StaffLocation {
    pub user_id: DbId,
    pub full_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub updated_at: Timestamp,
}
