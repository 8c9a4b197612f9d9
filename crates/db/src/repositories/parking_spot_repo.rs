//! Repository for the `parking_spots` table.
//!
//! Claims and releases are single conditional updates. A claim only lands
//! on a free spot (or one the caller already holds), and a release only
//! lands when the caller is the occupant. Zero affected rows means the
//! guard failed; callers re-read to report why.

use site_core::types::DbId;
use sqlx::PgPool;

use crate::models::parking_spot::ParkingSpot;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, location_code, is_occupied, occupied_by, updated_at";

pub struct ParkingSpotRepo;

impl ParkingSpotRepo {
    /// Provision a new, free spot.
    pub async fn create(pool: &PgPool, location_code: &str) -> Result<ParkingSpot, sqlx::Error> {
        let query = format!(
            "INSERT INTO parking_spots (location_code) VALUES ($1) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ParkingSpot>(&query)
            .bind(location_code)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ParkingSpot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parking_spots WHERE id = $1");
        sqlx::query_as::<_, ParkingSpot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All spots ordered by location code.
    pub async fn list(pool: &PgPool) -> Result<Vec<ParkingSpot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parking_spots ORDER BY location_code ASC");
        sqlx::query_as::<_, ParkingSpot>(&query)
            .fetch_all(pool)
            .await
    }

    /// Mark the spot occupied by `user_id` if it is free or already theirs.
    pub async fn claim(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<ParkingSpot>, sqlx::Error> {
        let query = format!(
            "UPDATE parking_spots SET is_occupied = TRUE, occupied_by = $2
             WHERE id = $1 AND (is_occupied = FALSE OR occupied_by = $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ParkingSpot>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Free the spot if `user_id` is the current occupant.
    pub async fn release(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<ParkingSpot>, sqlx::Error> {
        let query = format!(
            "UPDATE parking_spots SET is_occupied = FALSE, occupied_by = NULL
             WHERE id = $1 AND is_occupied = TRUE AND occupied_by = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ParkingSpot>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
