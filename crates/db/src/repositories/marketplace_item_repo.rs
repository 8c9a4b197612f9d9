//! Repository for the `marketplace_items` table.

use site_core::status::MarketplaceItemStatus;
use site_core::types::DbId;
use sqlx::PgPool;

use crate::models::marketplace_item::{CreateMarketplaceItem, MarketplaceItem};

const COLUMNS: &str = "id, user_id, title, price, description, image_url, status, \
                        created_at, updated_at";

pub struct MarketplaceItemRepo;

impl MarketplaceItemRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateMarketplaceItem,
    ) -> Result<MarketplaceItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO marketplace_items (user_id, title, price, description, image_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MarketplaceItem>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(input.price)
            .bind(&input.description)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MarketplaceItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM marketplace_items WHERE id = $1");
        sqlx::query_as::<_, MarketplaceItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Active listings, newest first.
    pub async fn list_active(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MarketplaceItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM marketplace_items
             WHERE status = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, MarketplaceItem>(&query)
            .bind(MarketplaceItemStatus::Active.as_str())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Mark an active listing sold. `None` if it was not active.
    pub async fn mark_sold(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MarketplaceItem>, sqlx::Error> {
        let query = format!(
            "UPDATE marketplace_items SET status = $2
             WHERE id = $1 AND status = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MarketplaceItem>(&query)
            .bind(id)
            .bind(MarketplaceItemStatus::Sold.as_str())
            .bind(MarketplaceItemStatus::Active.as_str())
            .fetch_optional(pool)
            .await
    }
}
