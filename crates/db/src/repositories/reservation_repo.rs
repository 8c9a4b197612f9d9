//! Repository for the `reservations` table.

use chrono::NaiveDate;
use site_core::types::DbId;
use sqlx::PgPool;

use crate::models::reservation::{CreateReservation, Reservation};

const COLUMNS: &str = "id, user_id, facility_name, date, time_slot, created_at";

pub struct ReservationRepo;

impl ReservationRepo {
    /// Insert a reservation. A taken slot fails with a unique violation on
    /// `uq_reservations_slot`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateReservation,
    ) -> Result<Reservation, sqlx::Error> {
        let query = format!(
            "INSERT INTO reservations (user_id, facility_name, date, time_slot)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(input.user_id)
            .bind(&input.facility_name)
            .bind(input.date)
            .bind(&input.time_slot)
            .fetch_one(pool)
            .await
    }

    /// Whether no reservation holds the given slot.
    pub async fn is_available(
        pool: &PgPool,
        facility_name: &str,
        date: NaiveDate,
        time_slot: &str,
    ) -> Result<bool, sqlx::Error> {
        let (taken,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(
                SELECT 1 FROM reservations
                WHERE facility_name = $1 AND date = $2 AND time_slot = $3
             )",
        )
        .bind(facility_name)
        .bind(date)
        .bind(time_slot)
        .fetch_one(pool)
        .await?;
        Ok(!taken)
    }

    /// A resident's reservations ordered by date, then slot.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations WHERE user_id = $1
             ORDER BY date ASC, time_slot ASC"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
