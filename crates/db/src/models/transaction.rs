//! Resident ledger model.

use chrono::NaiveDate;
use serde::Serialize;
use site_core::status::{TransactionKind, TransactionStatus};
use site_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `transactions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Transaction {
    pub id: DbId,
    pub user_id: DbId,
    pub amount: f64,
    #[sqlx(rename = "type", try_from = "String")]
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[sqlx(try_from = "String")]
    pub status: TransactionStatus,
    pub due_date: NaiveDate,
    pub created_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateTransaction {
    pub user_id: DbId,
    pub amount: f64,
    pub kind: TransactionKind,
    pub due_date: NaiveDate,
}
