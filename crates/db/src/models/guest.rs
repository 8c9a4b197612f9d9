//! Guest pass model and DTOs.

use chrono::NaiveDate;
use serde::Serialize;
use site_core::status::GuestStatus;
use site_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `guests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Guest {
    pub id: DbId,
    /// Resident who registered the visitor.
    pub user_id: DbId,
    pub full_name: String,
    pub plate_number: Option<String>,
    pub visit_date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub status: GuestStatus,
    pub qr_token: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a guest pass. The token is generated by the caller.
#[derive(Debug)]
pub struct CreateGuest {
    pub user_id: DbId,
    pub full_name: String,
    pub plate_number: Option<String>,
    pub visit_date: NaiveDate,
    pub qr_token: String,
}
