//! HTTP handlers for quote calculation.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::error::Result;
use crate::AppState;

use super::calculators::compute_quote;
use super::requests::QuoteRequest;
use super::responses::{BookingQuoteResponse, QuoteResponse};
use super::services;

/// Pricing routes, mounted under `/api`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pricing/quote", post(quote))
        .route("/bookings/:id/quote", get(booking_quote))
        .route("/bookings/:id/recalculate", post(recalculate))
}

/// Quote an unsaved booking. No database access.
async fn quote(Json(request): Json<QuoteRequest>) -> Json<QuoteResponse> {
    let quote = compute_quote(&request.into_context());
    Json(QuoteResponse::from(&quote))
}

/// Quote a stored booking without changing it
async fn booking_quote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingQuoteResponse>> {
    let booking = services::quote_booking(&state.db, id).await?;
    Ok(Json(BookingQuoteResponse::from(&booking)))
}

/// Recompute a stored booking and persist its base and total prices
async fn recalculate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingQuoteResponse>> {
    let booking = services::recalculate_booking(&state.db, id).await?;
    Ok(Json(BookingQuoteResponse::from(&booking)))
}
