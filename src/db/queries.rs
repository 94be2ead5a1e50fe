//! Database queries for marketplace listings and the public ledger

use sqlx::PgPool;

use crate::error::Result;
use crate::models::{LedgerLine, ProviderSummary, ServiceCategory};

/// Get all active service categories
pub async fn get_service_categories(pool: &PgPool) -> Result<Vec<ServiceCategory>> {
    let categories = sqlx::query_as::<_, ServiceCategory>(
        r#"
        SELECT id, slug, name, description, sort_order
        FROM service_categories
        WHERE active = true
        ORDER BY sort_order, name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(categories)
}

/// Get provider listings with optional category filter
pub async fn get_providers(
    pool: &PgPool,
    category_slug: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<ProviderSummary>> {
    let providers = sqlx::query_as::<_, ProviderSummary>(
        r#"
        SELECT
            p.id,
            p.business_name,
            c.slug as category_slug,
            c.name as category_name,
            p.city,
            p.hourly_rate_cents,
            p.rating::float8 as rating,
            COALESCE(p.review_count, 0)::bigint as review_count,
            COALESCE(p.verified, false) as verified
        FROM providers p
        LEFT JOIN service_categories c ON p.category_id = c.id
        WHERE p.deleted_at IS NULL
          AND p.status = 'active'
          AND ($1::text IS NULL OR c.slug = $1)
        ORDER BY p.verified DESC, p.rating DESC NULLS LAST, p.business_name
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(category_slug)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(providers)
}

/// Count provider listings (for pagination)
pub async fn count_providers(pool: &PgPool, category_slug: Option<&str>) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM providers p
        LEFT JOIN service_categories c ON p.category_id = c.id
        WHERE p.deleted_at IS NULL
          AND p.status = 'active'
          AND ($1::text IS NULL OR c.slug = $1)
        "#,
    )
    .bind(category_slug)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Aggregate public ledger entries by category and kind
pub async fn get_ledger_lines(pool: &PgPool) -> Result<Vec<LedgerLine>> {
    let lines = sqlx::query_as::<_, LedgerLine>(
        r#"
        SELECT
            category,
            kind,
            COALESCE(SUM(amount_cents), 0)::bigint as total_cents,
            COUNT(*) as entry_count
        FROM ledger_entries
        WHERE is_public = true
        GROUP BY category, kind
        ORDER BY kind, total_cents DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(lines)
}
