//! Repository for the `guests` table.
//!
//! Status changes go through [`GuestRepo::advance_status`], a conditional
//! update that only applies when the row still holds the expected prior
//! status. Two operators scanning the same token at once therefore cannot
//! both check the guest in.

use chrono::NaiveDate;
use site_core::status::GuestStatus;
use site_core::types::DbId;
use sqlx::PgPool;

use crate::models::guest::{CreateGuest, Guest};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, full_name, plate_number, visit_date, status, qr_token, \
                        created_at, updated_at";

/// Provides CRUD and lifecycle operations for guest passes.
pub struct GuestRepo;

impl GuestRepo {
    /// Insert a new guest pass with status `expected`.
    ///
    /// A duplicate token surfaces as a unique violation on
    /// `uq_guests_qr_token`; callers regenerate and retry.
    pub async fn create(pool: &PgPool, input: &CreateGuest) -> Result<Guest, sqlx::Error> {
        let query = format!(
            "INSERT INTO guests (user_id, full_name, plate_number, visit_date, qr_token)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Guest>(&query)
            .bind(input.user_id)
            .bind(&input.full_name)
            .bind(&input.plate_number)
            .bind(input.visit_date)
            .bind(&input.qr_token)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Guest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM guests WHERE id = $1");
        sqlx::query_as::<_, Guest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Exact-match lookup by access token.
    pub async fn find_by_token(pool: &PgPool, token: &str) -> Result<Option<Guest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM guests WHERE qr_token = $1");
        sqlx::query_as::<_, Guest>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// All guests, earliest visit first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Guest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM guests ORDER BY visit_date ASC, id ASC");
        sqlx::query_as::<_, Guest>(&query).fetch_all(pool).await
    }

    /// Guests registered by one resident, earliest visit first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Guest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM guests WHERE user_id = $1 ORDER BY visit_date ASC, id ASC"
        );
        sqlx::query_as::<_, Guest>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Guests whose status is one of `statuses`, earliest visit first.
    pub async fn list_by_statuses(
        pool: &PgPool,
        statuses: &[GuestStatus],
    ) -> Result<Vec<Guest>, sqlx::Error> {
        let statuses: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();
        let query = format!(
            "SELECT {COLUMNS} FROM guests WHERE status = ANY($1) ORDER BY visit_date ASC, id ASC"
        );
        sqlx::query_as::<_, Guest>(&query)
            .bind(&statuses)
            .fetch_all(pool)
            .await
    }

    /// Move a guest from `from` to `to` if it is still in `from`.
    ///
    /// Returns `None` when the row does not exist or has already moved on.
    pub async fn advance_status(
        pool: &PgPool,
        id: DbId,
        from: GuestStatus,
        to: GuestStatus,
    ) -> Result<Option<Guest>, sqlx::Error> {
        let query = format!(
            "UPDATE guests SET status = $3
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Guest>(&query)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Count guests expected on a given date.
    pub async fn count_for_date(pool: &PgPool, date: NaiveDate) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM guests WHERE visit_date = $1")
            .bind(date)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
