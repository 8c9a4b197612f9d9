//! Emergency alert model.

use serde::{Deserialize, Serialize};
use site_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `emergency_alerts` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct EmergencyAlert {
    pub id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub alert_type: String,
    pub message: String,
    pub active: bool,
    pub created_at: Timestamp,
}
