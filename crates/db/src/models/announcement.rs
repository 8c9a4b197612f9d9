//! Announcement model and DTOs.

use chrono::NaiveDate;
use serde::Serialize;
use site_core::status::AnnouncementPriority;
use site_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Announcement {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub priority: AnnouncementPriority,
    pub created_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateAnnouncement {
    pub title: String,
    pub content: String,
    /// Defaults to today when `None`.
    pub date: Option<NaiveDate>,
    pub priority: AnnouncementPriority,
}
