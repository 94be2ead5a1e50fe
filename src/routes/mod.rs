//! HTTP routes for marketplace reads, the ledger and service health

pub mod health;
pub mod ledger;
pub mod marketplace;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

/// Marketplace routes, mounted under `/api`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(marketplace::categories))
        .route("/providers", get(marketplace::providers))
        .route("/ledger", get(ledger::summary))
}

/// Cache administration routes, mounted under `/api` when enabled
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/cache/stats", get(health::cache_stats))
        .route("/cache/invalidate", post(health::invalidate_cache))
}
