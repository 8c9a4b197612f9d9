//! Repository for the `transactions` table.

use site_core::types::DbId;
use sqlx::PgPool;

use crate::models::transaction::{CreateTransaction, Transaction};

const COLUMNS: &str = "id, user_id, amount, type, status, due_date, created_at";

pub struct TransactionRepo;

impl TransactionRepo {
    /// Post a new unpaid charge.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTransaction,
    ) -> Result<Transaction, sqlx::Error> {
        let query = format!(
            "INSERT INTO transactions (user_id, amount, type, due_date)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(input.user_id)
            .bind(input.amount)
            .bind(input.kind.as_str())
            .bind(input.due_date)
            .fetch_one(pool)
            .await
    }

    /// A resident's ledger, latest due date first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transactions WHERE user_id = $1 ORDER BY due_date DESC, id DESC"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
