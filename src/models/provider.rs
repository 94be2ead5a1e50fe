//! Service categories and provider listings

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Service category (movers, plumbers, cleaners, ...)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServiceCategory {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub sort_order: i32,
}

/// Provider card shown in marketplace listings
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProviderSummary {
    pub id: Uuid,
    pub business_name: String,
    pub category_slug: Option<String>,
    pub category_name: Option<String>,
    pub city: Option<String>,
    pub hourly_rate_cents: Option<i64>,
    pub rating: Option<f64>,
    pub review_count: i64,
    pub verified: bool,
}
