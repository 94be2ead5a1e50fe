//! Health and cache administration handlers
//!
//! The cache handlers are only mounted when `ENABLE_CACHE_ADMIN` is set.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::cache::CacheStats;
use crate::error::{AppError, Result};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Liveness check; does not touch the database
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats().await)
}

/// Body for cache invalidation; an empty body clears everything
#[derive(Debug, Default, Deserialize)]
pub struct InvalidateRequest {
    #[serde(default)]
    pub category: Option<String>,
}

pub async fn invalidate_cache(
    State(state): State<AppState>,
    body: Option<Json<InvalidateRequest>>,
) -> Result<Json<CacheStats>> {
    let request = body.map(|Json(request)| request).unwrap_or_default();

    match request.category.as_deref() {
        Some(slug) => state
            .cache
            .invalidate_category(slug)
            .map_err(|e| AppError::Internal(format!("cache invalidation failed: {}", e)))?,
        None => state.cache.invalidate_all(),
    }

    Ok(Json(state.cache.stats().await))
}
