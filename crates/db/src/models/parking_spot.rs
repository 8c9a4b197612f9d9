//! Parking spot model.

use serde::{Deserialize, Serialize};
use site_core::parking::Occupancy;
use site_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `parking_spots` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ParkingSpot {
    pub id: DbId,
    pub location_code: String,
    pub is_occupied: bool,
    pub occupied_by: Option<DbId>,
    pub updated_at: Timestamp,
}

impl ParkingSpot {
    /// Occupancy facts for the rules in [`site_core::parking`].
    pub fn occupancy(&self) -> Occupancy {
        Occupancy {
            is_occupied: self.is_occupied,
            occupied_by: self.occupied_by,
        }
    }
}
