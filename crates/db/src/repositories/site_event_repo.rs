//! Repository for the `site_events` table.

use site_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::site_event::{CreateSiteEvent, SiteEvent};

const COLUMNS: &str = "id, title, date, location, description, created_at";

pub struct SiteEventRepo;

impl SiteEventRepo {
    pub async fn create(pool: &PgPool, input: &CreateSiteEvent) -> Result<SiteEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO site_events (title, date, location, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteEvent>(&query)
            .bind(&input.title)
            .bind(input.date)
            .bind(&input.location)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Events starting at or after `from`, soonest first.
    pub async fn list_upcoming(
        pool: &PgPool,
        from: Timestamp,
        limit: i64,
    ) -> Result<Vec<SiteEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM site_events WHERE date >= $1 ORDER BY date ASC LIMIT $2"
        );
        sqlx::query_as::<_, SiteEvent>(&query)
            .bind(from)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
