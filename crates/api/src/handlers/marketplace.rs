//! Handlers for the resident marketplace (`/marketplace`).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use site_core::error::CoreError;
use site_core::marketplace::{validate_listing, validate_mark_sold};
use site_core::types::DbId;
use site_core::validation::optional_text;
use site_db::models::marketplace_item::{CreateMarketplaceItem, MarketplaceItem};
use site_db::repositories::MarketplaceItemRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateListingBody {
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    pub image_url: Option<String>,
}

/// GET /api/v1/marketplace
pub async fn list_items(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<MarketplaceItem>>>> {
    let items =
        MarketplaceItemRepo::list_active(&state.pool, params.limit(), params.offset()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/marketplace
pub async fn create_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateListingBody>,
) -> AppResult<(StatusCode, Json<DataResponse<MarketplaceItem>>)> {
    let title = validate_listing(&input.title, input.price)?;
    let dto = CreateMarketplaceItem {
        user_id: auth.user_id,
        title,
        price: input.price,
        description: input.description.trim().to_string(),
        image_url: optional_text(input.image_url.as_deref()),
    };
    let item = MarketplaceItemRepo::create(&state.pool, &dto).await?;
    tracing::info!(item_id = item.id, seller_id = auth.user_id, "Marketplace item listed");
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// POST /api/v1/marketplace/{id}/sold
pub async fn mark_sold(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MarketplaceItem>>> {
    let item = MarketplaceItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "marketplace_item",
            id,
        }))?;
    validate_mark_sold(item.status, item.user_id, auth.user_id)?;

    let item = MarketplaceItemRepo::mark_sold(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Conflict("Item is already sold".into())))?;
    tracing::info!(item_id = id, "Marketplace item sold");
    Ok(Json(DataResponse { data: item }))
}
