//! Marketplace listing handlers

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::cache::{AppCache, ProviderPage};
use crate::db;
use crate::error::{AppError, Result};
use crate::models::{ProviderSummary, ServiceCategory};
use crate::AppState;

pub const PROVIDERS_PER_PAGE: i64 = 12;

/// Query parameters for provider listing
#[derive(Debug, Deserialize)]
pub struct ProviderListQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

/// Provider listing response
#[derive(Debug, Serialize)]
pub struct ProviderListResponse {
    pub providers: Vec<ProviderSummary>,
    pub category: Option<String>,
    pub page: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Number of pages needed for `total` items
pub fn total_pages(total: i64, per_page: i64) -> i64 {
    if total <= 0 || per_page <= 0 {
        return 0;
    }
    (total + per_page - 1) / per_page
}

/// Service category list
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<ServiceCategory>>> {
    let key = AppCache::categories_key();
    let categories = if let Some(cached) = state.cache.categories.get(&key).await {
        tracing::debug!("Cache HIT for categories");
        cached
    } else {
        tracing::debug!("Cache MISS for categories");
        let categories = Arc::new(db::get_service_categories(&state.db).await?);
        state.cache.categories.insert(key, categories.clone()).await;
        categories
    };

    Ok(Json((*categories).clone()))
}

/// Provider listing, optionally filtered by category
pub async fn providers(
    State(state): State<AppState>,
    Query(query): Query<ProviderListQuery>,
) -> Result<Json<ProviderListResponse>> {
    let page = query.page.max(1);
    let category = query
        .category
        .map(|c| c.trim().to_ascii_lowercase())
        .filter(|c| !c.is_empty());

    if let Some(slug) = category.as_deref() {
        if !slug.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_') {
            return Err(AppError::BadRequest(format!("invalid category slug: {}", slug)));
        }
    }

    let key = AppCache::provider_listing_key(category.as_deref(), page);
    let listing = if let Some(cached) = state.cache.provider_listings.get(&key).await {
        tracing::debug!("Cache HIT for provider listing: {}", key);
        cached
    } else {
        tracing::debug!("Cache MISS for provider listing: {}", key);
        let offset = (page - 1).saturating_mul(PROVIDERS_PER_PAGE);
        let providers =
            db::get_providers(&state.db, category.as_deref(), PROVIDERS_PER_PAGE, offset).await?;
        let total = db::count_providers(&state.db, category.as_deref()).await?;
        let listing = Arc::new(ProviderPage { providers, total });
        state.cache.provider_listings.insert(key, listing.clone()).await;
        listing
    };

    let total_pages = total_pages(listing.total, PROVIDERS_PER_PAGE);

    Ok(Json(ProviderListResponse {
        providers: listing.providers.clone(),
        category,
        page,
        total: listing.total,
        total_pages,
        has_previous: page > 1,
        has_next: page < total_pages,
    }))
}
