//! In-memory caching using moka
//!
//! Time-boxed read cache for marketplace listings and the public ledger.
//! The cache is owned by `AppState` and handed to handlers; nothing here is
//! process-global.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::config::MAX_CACHE_SECS;
use crate::db::queries;
use crate::models::{LedgerSummary, ProviderSummary, ServiceCategory};

const CATEGORIES_KEY: &str = "categories";
const LEDGER_KEY: &str = "ledger";

/// One page of provider listings plus the total for pagination
#[derive(Debug, Clone, Serialize)]
pub struct ProviderPage {
    pub providers: Vec<ProviderSummary>,
    pub total: i64,
}

/// Application cache holding marketplace reads
#[derive(Clone)]
pub struct AppCache {
    /// Service categories (singleton)
    pub categories: Cache<String, Arc<Vec<ServiceCategory>>>,
    /// Provider listings (cache_key -> page)
    pub provider_listings: Cache<String, Arc<ProviderPage>>,
    /// Public ledger totals (singleton)
    pub ledger: Cache<String, Arc<LedgerSummary>>,
}

impl AppCache {
    /// Create a cache whose entries expire `ttl` after insertion.
    ///
    /// `ttl` is capped at `MAX_CACHE_SECS`; moka rejects longer expiries.
    pub fn new(ttl: Duration) -> Self {
        let ttl = ttl.min(Duration::from_secs(MAX_CACHE_SECS));
        Self {
            // Categories change only when the catalogue is edited
            categories: Cache::builder()
                .max_capacity(1)
                .time_to_live(ttl.saturating_mul(2))
                .build(),

            // Listings: categories x pages
            provider_listings: Cache::builder()
                .max_capacity(200)
                .time_to_live(ttl)
                .time_to_idle(ttl / 3)
                .support_invalidation_closures()
                .build(),

            ledger: Cache::builder()
                .max_capacity(1)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Get cache statistics for monitoring.
    ///
    /// Pending inserts and invalidations are applied first so the counts are current.
    pub async fn stats(&self) -> CacheStats {
        self.categories.run_pending_tasks().await;
        self.provider_listings.run_pending_tasks().await;
        self.ledger.run_pending_tasks().await;

        CacheStats {
            categories_cached: self.categories.entry_count() > 0,
            provider_listings_size: self.provider_listings.entry_count(),
            ledger_cached: self.ledger.entry_count() > 0,
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.categories.invalidate_all();
        self.provider_listings.invalidate_all();
        self.ledger.invalidate_all();
        info!("All caches invalidated");
    }

    /// Invalidate listings touching a category
    pub fn invalidate_category(&self, slug: &str) -> Result<(), moka::PredicateError> {
        let prefix = format!("providers:{}:", slug);
        let all_prefix = "providers:all:";
        self.provider_listings
            .invalidate_entries_if(move |key, _| {
                key.starts_with(&prefix) || key.starts_with(all_prefix)
            })?;
        self.categories.invalidate_all();
        info!("Cache invalidated for category: {}", slug);
        Ok(())
    }

    /// Generate cache key for a provider listing page
    pub fn provider_listing_key(category: Option<&str>, page: i64) -> String {
        match category {
            Some(cat) => format!("providers:{}:{}", cat, page),
            None => format!("providers:all:{}", page),
        }
    }

    pub fn categories_key() -> String {
        CATEGORIES_KEY.to_string()
    }

    pub fn ledger_key() -> String {
        LEDGER_KEY.to_string()
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(15 * 60))
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub categories_cached: bool,
    pub provider_listings_size: u64,
    pub ledger_cached: bool,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes every `period`.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool, period: Duration, page_size: i64) {
    let mut interval = interval(warm_period(period));
    loop {
        // First tick fires immediately
        interval.tick().await;
        warm_cache(&cache, &db, page_size).await;
    }
}

/// `tokio::time::interval` panics on a zero period
fn warm_period(period: Duration) -> Duration {
    period.max(Duration::from_secs(1))
}

/// Warm the cache with commonly accessed data
async fn warm_cache(cache: &AppCache, db: &PgPool, page_size: i64) {
    info!("Starting cache warm-up...");

    match queries::get_service_categories(db).await {
        Ok(categories) => {
            cache
                .categories
                .insert(AppCache::categories_key(), Arc::new(categories))
                .await;
        }
        Err(e) => warn!("Failed to warm categories cache: {}", e),
    }

    // First page of the unfiltered provider listing
    let first_page = async {
        let providers = queries::get_providers(db, None, page_size, 0).await?;
        let total = queries::count_providers(db, None).await?;
        Ok::<_, crate::error::AppError>(ProviderPage { providers, total })
    };
    match first_page.await {
        Ok(page) => {
            let key = AppCache::provider_listing_key(None, 1);
            cache.provider_listings.insert(key, Arc::new(page)).await;
        }
        Err(e) => warn!("Failed to warm provider listing cache: {}", e),
    }

    match queries::get_ledger_lines(db).await {
        Ok(lines) => {
            cache
                .ledger
                .insert(AppCache::ledger_key(), Arc::new(LedgerSummary::from_lines(lines)))
                .await;
        }
        Err(e) => warn!("Failed to warm ledger cache: {}", e),
    }

    info!("Cache warm-up complete. Stats: {:?}", cache.stats().await);
}
