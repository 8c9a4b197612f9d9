//! Support ticket model and DTOs.

use serde::Serialize;
use site_core::status::{ServiceRequestCategory, ServiceRequestStatus};
use site_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `service_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServiceRequest {
    pub id: DbId,
    pub user_id: DbId,
    #[sqlx(try_from = "String")]
    pub category: ServiceRequestCategory,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub status: ServiceRequestStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateServiceRequest {
    pub user_id: DbId,
    pub category: ServiceRequestCategory,
    pub description: String,
}

/// Filter for staff work queues.
#[derive(Debug, Default)]
pub struct ServiceRequestFilter {
    /// Empty means any status.
    pub statuses: Vec<ServiceRequestStatus>,
    pub category: Option<ServiceRequestCategory>,
}
