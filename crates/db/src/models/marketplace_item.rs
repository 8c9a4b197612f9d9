//! Marketplace listing model and DTOs.

use serde::Serialize;
use site_core::status::MarketplaceItemStatus;
use site_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `marketplace_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MarketplaceItem {
    pub id: DbId,
    /// Seller.
    pub user_id: DbId,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub image_url: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: MarketplaceItemStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateMarketplaceItem {
    pub user_id: DbId,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub image_url: Option<String>,
}
