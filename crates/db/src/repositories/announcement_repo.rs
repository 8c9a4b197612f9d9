//! Repository for the `announcements` table.

use site_core::types::DbId;
use sqlx::PgPool;

use crate::models::announcement::{Announcement, CreateAnnouncement};

const COLUMNS: &str = "id, title, content, date, priority, created_at";

pub struct AnnouncementRepo;

impl AnnouncementRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateAnnouncement,
    ) -> Result<Announcement, sqlx::Error> {
        let query = format!(
            "INSERT INTO announcements (title, content, date, priority)
             VALUES ($1, $2, COALESCE($3, CURRENT_DATE), $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.date)
            .bind(input.priority.as_str())
            .fetch_one(pool)
            .await
    }

    /// Newest first.
    pub async fn list(pool: &PgPool, limit: i64) -> Result<Vec<Announcement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM announcements ORDER BY date DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
