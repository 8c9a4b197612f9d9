//! Resident marketplace listing rules.

use crate::error::CoreError;
use crate::status::MarketplaceItemStatus;
use crate::types::DbId;

/// Validate a listing title and price. Free items (price 0) are allowed.
pub fn validate_listing(title: &str, price: f64) -> Result<String, CoreError> {
    let title = crate::validation::require_text("title", title)?;
    if !price.is_finite() || price < 0.0 {
        return Err(CoreError::Validation(
            "price must be a non-negative number".into(),
        ));
    }
    Ok(title)
}

/// Only the seller may mark an active listing as sold.
pub fn validate_mark_sold(
    status: MarketplaceItemStatus,
    seller_id: DbId,
    acting_user: DbId,
) -> Result<(), CoreError> {
    if seller_id != acting_user {
        return Err(CoreError::Forbidden(
            "Only the seller can mark this item as sold".into(),
        ));
    }
    if status == MarketplaceItemStatus::Sold {
        return Err(CoreError::Conflict("Item is already sold".into()));
    }
    Ok(())
}
