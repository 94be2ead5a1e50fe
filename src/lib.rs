//! Haulers.app pricing and marketplace API.
//!
//! Computes booking quotes, persists booking totals, and serves cached
//! marketplace listings and the public ledger.

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod pricing;
pub mod routes;

use axum::{routing::get, Router};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::cache::AppCache;
use crate::config::Config;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            cache: AppCache::new(config.cache_ttl),
            config: Arc::new(config),
        }
    }
}

/// Build the application router with middleware
pub fn app(state: AppState) -> Router {
    let mut api = Router::new()
        .merge(pricing::router())
        .merge(routes::router());
    if state.config.cache_admin_enabled {
        api = api.merge(routes::admin_router());
    }

    Router::new()
        .route("/health", get(routes::health::health))
        .nest("/api", api)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
