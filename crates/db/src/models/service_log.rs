//! On-site service log model and DTOs.

use serde::Serialize;
use site_core::status::{ServiceLogKind, ServiceLogStatus};
use site_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `service_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServiceLog {
    pub id: DbId,
    pub resident_id: DbId,
    pub staff_id: Option<DbId>,
    #[sqlx(rename = "type", try_from = "String")]
    #[serde(rename = "type")]
    pub kind: ServiceLogKind,
    #[sqlx(try_from = "String")]
    pub status: ServiceLogStatus,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A pending log joined with the requesting resident's address, as shown
/// on the cleaners' task list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServiceLogTask {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub log: ServiceLog,
    pub resident_name: String,
    pub block_no: Option<String>,
    pub apartment_no: Option<String>,
}

#[derive(Debug)]
pub struct CreateServiceLog {
    pub resident_id: DbId,
    pub kind: ServiceLogKind,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
