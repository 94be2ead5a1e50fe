//! Pricing service functions with database access.
//!
//! Load a booking, run the calculator over it, and optionally write the
//! result back. The calculator itself never fails; only the store can.

use sqlx::PgPool;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::calculators::{compute_quote, QuoteResult};
use super::models::BookingRow;
use super::queries;

/// Quote computed for a stored booking
#[derive(Debug, Clone)]
pub struct BookingQuote {
    pub booking_id: Uuid,
    pub quote: QuoteResult,
    /// Prices stored on the booking before this calculation
    pub previous_base_cents: Option<i64>,
    pub previous_total_cents: Option<i64>,
    /// Whether the computed prices were written back
    pub persisted: bool,
}

impl BookingQuote {
    fn from_row(row: &BookingRow, quote: QuoteResult, persisted: bool) -> Self {
        Self {
            booking_id: row.id,
            quote,
            previous_base_cents: row.base_price_cents,
            previous_total_cents: row.total_price_cents,
            persisted,
        }
    }

    /// True when the stored total differs from the freshly computed one
    pub fn is_stale(&self) -> bool {
        self.previous_total_cents != Some(self.quote.total_due_cents)
    }
}

/// Pricing calculation error types
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("Booking {0} not found")]
    BookingNotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

async fn load_booking(pool: &PgPool, booking_id: Uuid) -> Result<BookingRow, PricingError> {
    queries::get_booking(pool, booking_id)
        .await?
        .ok_or(PricingError::BookingNotFound(booking_id))
}

/// Compute the quote for a stored booking without persisting it.
pub async fn quote_booking(pool: &PgPool, booking_id: Uuid) -> Result<BookingQuote, PricingError> {
    let row = load_booking(pool, booking_id).await?;
    let quote = compute_quote(&row.pricing_context());
    Ok(BookingQuote::from_row(&row, quote, false))
}

/// Recompute a booking's prices and write `base_price_cents` and
/// `total_price_cents` back to the same row.
///
/// A failed write is not retried here; the stored prices stay stale until
/// the next recalculation.
pub async fn recalculate_booking(
    pool: &PgPool,
    booking_id: Uuid,
) -> Result<BookingQuote, PricingError> {
    let row = load_booking(pool, booking_id).await?;
    let quote = compute_quote(&row.pricing_context());

    let updated = queries::update_booking_prices(
        pool,
        booking_id,
        quote.base_cents,
        quote.total_due_cents,
    )
    .await
    .map_err(|e| {
        error!(
            booking_id = %booking_id,
            total_due_cents = quote.total_due_cents,
            "Computed booking total but failed to store it: {}",
            e
        );
        PricingError::Database(e)
    })?;

    if updated == 0 {
        warn!(booking_id = %booking_id, "Booking disappeared before prices were stored");
        return Err(PricingError::BookingNotFound(booking_id));
    }

    info!(
        booking_id = %booking_id,
        base_cents = quote.base_cents,
        total_due_cents = quote.total_due_cents,
        previous_total_cents = ?row.total_price_cents,
        "Booking prices recalculated"
    );

    Ok(BookingQuote::from_row(&row, quote, true))
}
