//! Facility reservation model and DTOs.

use chrono::NaiveDate;
use serde::Serialize;
use site_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `reservations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reservation {
    pub id: DbId,
    pub user_id: DbId,
    pub facility_name: String,
    pub date: NaiveDate,
    pub time_slot: String,
    pub created_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateReservation {
    pub user_id: DbId,
    pub facility_name: String,
    pub date: NaiveDate,
    pub time_slot: String,
}
