//! Public ledger handler

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::cache::AppCache;
use crate::db;
use crate::error::Result;
use crate::models::LedgerSummary;
use crate::AppState;

/// Aggregate income and expense per category
pub async fn summary(State(state): State<AppState>) -> Result<Json<LedgerSummary>> {
    let key = AppCache::ledger_key();
    let summary = if let Some(cached) = state.cache.ledger.get(&key).await {
        tracing::debug!("Cache HIT for ledger");
        cached
    } else {
        tracing::debug!("Cache MISS for ledger");
        let lines = db::get_ledger_lines(&state.db).await?;
        let summary = Arc::new(LedgerSummary::from_lines(lines));
        state.cache.ledger.insert(key, summary.clone()).await;
        summary
    };

    Ok(Json((*summary).clone()))
}
