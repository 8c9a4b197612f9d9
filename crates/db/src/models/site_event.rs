//! Community calendar event model.

use serde::Serialize;
use site_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SiteEvent {
    pub id: DbId,
    pub title: String,
    pub date: Timestamp,
    pub location: String,
    pub description: String,
    pub created_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateSiteEvent {
    pub title: String,
    pub date: Timestamp,
    pub location: String,
    pub description: String,
}
