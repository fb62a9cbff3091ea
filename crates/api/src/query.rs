//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped with `vowly_db::clamp_limit` / `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    pub const DEFAULT_LIMIT: i64 = 100;
    pub const MAX_LIMIT: i64 = 500;

    /// `(limit, offset)` after clamping.
    pub fn resolve(&self) -> (i64, i64) {
        (
            vowly_db::clamp_limit(self.limit, Self::DEFAULT_LIMIT, Self::MAX_LIMIT),
            vowly_db::clamp_offset(self.offset),
        )
    }
}

/// Query parameters for list endpoints that support an `include_inactive` flag.
#[derive(Debug, Deserialize)]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}
