//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::calculators::{LineItem, QuoteResult};
use super::services::BookingQuote;

pub const DEFAULT_CURRENCY: &str = "USD";

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    pub cents: i64,
    /// Dollar amount, serialized as a string to keep it exact
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    pub fn from_cents(cents: i64) -> Self {
        Self {
            cents,
            amount: Decimal::new(cents, 2),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// Response for a quote calculation
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub team_hourly_cents: Option<i64>,
    pub per_mover_rate_cents: Option<i64>,
    pub is_team_rate: bool,
    pub base_cents: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub additional_hours: Decimal,
    pub additional_hours_cents: i64,
    pub destination_fee_cents: i64,
    pub heavy_items_cents: i64,
    pub packing_cents: i64,
    pub stairs_cents: i64,
    pub storage_cents: i64,
    pub insurance_cents: i64,
    pub additional_fees_cents: i64,
    pub total_due_cents: i64,
    pub line_items: Vec<LineItem>,
    pub total: MoneyResponse,
}

impl From<&QuoteResult> for QuoteResponse {
    fn from(quote: &QuoteResult) -> Self {
        Self {
            team_hourly_cents: quote.rate.team_hourly_cents,
            per_mover_rate_cents: quote.rate.per_mover_rate_cents,
            is_team_rate: quote.rate.is_team_rate,
            base_cents: quote.base_cents,
            additional_hours: quote.additional_hours,
            additional_hours_cents: quote.additional_hours_cents,
            destination_fee_cents: quote.destination_fee_cents,
            heavy_items_cents: quote.heavy_items_cents,
            packing_cents: quote.packing_cents,
            stairs_cents: quote.stairs_cents,
            storage_cents: quote.storage_cents,
            insurance_cents: quote.insurance_cents,
            additional_fees_cents: quote.additional_fees_cents,
            total_due_cents: quote.total_due_cents,
            line_items: quote.line_items(),
            total: MoneyResponse::from_cents(quote.total_due_cents),
        }
    }
}

/// Response for a stored booking's quote
#[derive(Debug, Serialize)]
pub struct BookingQuoteResponse {
    pub booking_id: Uuid,
    pub quote: QuoteResponse,
    pub previous_base_cents: Option<i64>,
    pub previous_total_cents: Option<i64>,
    pub stale: bool,
    pub persisted: bool,
}

impl From<&BookingQuote> for BookingQuoteResponse {
    fn from(booking: &BookingQuote) -> Self {
        Self {
            booking_id: booking.booking_id,
            quote: QuoteResponse::from(&booking.quote),
            previous_base_cents: booking.previous_base_cents,
            previous_total_cents: booking.previous_total_cents,
            stale: booking.is_stale(),
            persisted: booking.persisted,
        }
    }
}
