//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped with `site_db::clamp_limit` / `clamp_offset`.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Default page size for list endpoints.
pub const DEFAULT_LIMIT: i64 = 50;
/// Largest page size a caller may ask for.
pub const MAX_LIMIT: i64 = 200;

impl PaginationParams {
    pub fn limit(&self) -> i64 {
        site_db::clamp_limit(self.limit, DEFAULT_LIMIT, MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        site_db::clamp_offset(self.offset)
    }
}
