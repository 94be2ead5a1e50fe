//! Database models for booking pricing.
//!
//! These models use sqlx's FromRow derive for direct database deserialization.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use super::breakdown::{itemised_heavy_items, Breakdown};
use super::calculators::BookingPricingContext;

/// Pricing columns of a booking from the `bookings` table.
///
/// Every pricing column is nullable; older rows leave most of them empty.
#[derive(Debug, Clone, FromRow)]
pub struct BookingRow {
    pub id: Uuid,
    pub movers: Option<i32>,
    pub hourly_rate_cents: Option<i64>,
    pub is_team_rate: Option<bool>,
    pub estimated_hours: Option<Decimal>,
    pub bill_additional_hours: Option<bool>,
    pub price_breakdown: Option<serde_json::Value>,
    pub heavy_items: Option<serde_json::Value>,
    pub packing_help: Option<String>,
    pub stairs_flights: Option<i32>,
    pub additional_fees_cents: Option<i64>,
    pub base_price_cents: Option<i64>,
    pub total_price_cents: Option<i64>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl BookingRow {
    /// Build the calculator input from this row.
    pub fn pricing_context(&self) -> BookingPricingContext {
        let breakdown = self
            .price_breakdown
            .clone()
            .unwrap_or(serde_json::Value::Null);

        BookingPricingContext {
            movers: self.movers.map(i64::from),
            hourly_rate_cents: self.hourly_rate_cents,
            is_team_rate: self.is_team_rate,
            estimated_hours: self.estimated_hours,
            bill_additional_hours: self.bill_additional_hours.unwrap_or(false),
            breakdown: Breakdown::from_value(&breakdown),
            heavy_items: itemised_heavy_items(self.heavy_items.as_ref(), &breakdown),
            packing_help: self.packing_help.clone(),
            stairs_flights: self.stairs_flights.map(i64::from).unwrap_or(0),
            additional_fees_cents: self.additional_fees_cents.unwrap_or(0),
        }
    }
}
