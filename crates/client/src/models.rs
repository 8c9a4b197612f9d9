//! Wire shapes the client reads from the API.
//!
//! Unknown fields are ignored, so the server may add columns freely.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use site_core::guest_pass::GateOutcome;
use site_core::parking::Occupancy;
use site_core::status::{GuestStatus, UserRole};
use site_core::types::{DbId, Timestamp};

/// `{ "data": ... }` envelope used by every API response.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// `{ "error", "code" }` body of a failed request.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingSpot {
    pub id: DbId,
    pub location_code: String,
    pub is_occupied: bool,
    pub occupied_by: Option<DbId>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl ParkingSpot {
    pub fn occupancy(&self) -> Occupancy {
        Occupancy {
            is_occupied: self.is_occupied,
            occupied_by: self.occupied_by,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuestPass {
    pub id: DbId,
    pub user_id: DbId,
    pub full_name: String,
    pub plate_number: Option<String>,
    pub visit_date: NaiveDate,
    pub qr_token: String,
    pub status: GuestStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GateResolution {
    pub outcome: GateOutcome,
    pub guest: Option<GuestPass>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmergencyAlert {
    pub id: DbId,
    #[serde(rename = "type")]
    pub alert_type: String,
    pub message: String,
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub user: Profile,
}
