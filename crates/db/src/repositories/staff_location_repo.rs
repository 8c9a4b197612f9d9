//! Repository for the `staff_locations` table.

use site_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::staff_location::StaffLocation;

pub struct StaffLocationRepo;

impl StaffLocationRepo {
    /// Record the latest position for a staff member.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        latitude: f64,
        longitude: f64,
    ) -> Result<Timestamp, sqlx::Error> {
        let (updated_at,): (Timestamp,) = sqlx::query_as(
            "INSERT INTO staff_locations (user_id, latitude, longitude)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id) DO UPDATE
                SET latitude = EXCLUDED.latitude,
                    longitude = EXCLUDED.longitude,
                    updated_at = NOW()
             RETURNING updated_at",
        )
        .bind(user_id)
        .bind(latitude)
        .bind(longitude)
        .fetch_one(pool)
        .await?;
        Ok(updated_at)
    }

    /// Positions reported at or after `since`, most recent first.
    pub async fn list_fresh(
        pool: &PgPool,
        since: Timestamp,
    ) -> Result<Vec<StaffLocation>, sqlx::Error> {
        sqlx::query_as::<_, StaffLocation>(
            "SELECT s.user_id, p.full_name, s.latitude, s.longitude, s.updated_at
             FROM staff_locations s
             JOIN profiles p ON p.id = s.user_id
             WHERE s.updated_at >= $1
             ORDER BY s.updated_at DESC",
        )
        .bind(since)
        .fetch_all(pool)
        .await
    }
}
