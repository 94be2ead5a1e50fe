//! Request DTOs for pricing API endpoints.
//!
//! Numeric fields are taken as raw JSON so that strings, floats and garbage
//! degrade to zero instead of rejecting the request.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use super::breakdown::{itemised_heavy_items, parse_decimal, Breakdown};
use super::calculators::{round_cents, BookingPricingContext};

/// Request to quote an unsaved booking
#[derive(Debug, Default, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub movers: Option<Value>,
    #[serde(default, alias = "hourlyRateCents")]
    pub hourly_rate_cents: Option<Value>,
    #[serde(default, alias = "isTeamRate")]
    pub is_team_rate: Option<Value>,
    #[serde(default, alias = "estimatedHours")]
    pub estimated_hours: Option<Value>,
    #[serde(default, alias = "billAdditionalHours")]
    pub bill_additional_hours: Option<Value>,
    #[serde(default, alias = "priceBreakdown", alias = "price_breakdown")]
    pub breakdown: Option<Value>,
    #[serde(default, alias = "heavyItems")]
    pub heavy_items: Option<Value>,
    #[serde(default, alias = "packingHelp")]
    pub packing_help: Option<Value>,
    #[serde(default, alias = "stairsFlights")]
    pub stairs_flights: Option<Value>,
    #[serde(default, alias = "additionalFeesCents")]
    pub additional_fees_cents: Option<Value>,
}

fn whole(value: Option<&Value>) -> Option<i64> {
    value.and_then(parse_decimal).map(round_cents)
}

fn flag(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        _ => None,
    }
}

fn text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        _ => None,
    }
}

impl QuoteRequest {
    /// Convert the request into calculator input.
    pub fn into_context(self) -> BookingPricingContext {
        let breakdown = self.breakdown.unwrap_or(Value::Null);

        BookingPricingContext {
            movers: whole(self.movers.as_ref()),
            hourly_rate_cents: whole(self.hourly_rate_cents.as_ref()),
            is_team_rate: flag(self.is_team_rate.as_ref()),
            estimated_hours: self
                .estimated_hours
                .as_ref()
                .and_then(parse_decimal)
                .filter(|hours| *hours > Decimal::ZERO),
            bill_additional_hours: flag(self.bill_additional_hours.as_ref()).unwrap_or(false),
            breakdown: Breakdown::from_value(&breakdown),
            heavy_items: itemised_heavy_items(self.heavy_items.as_ref(), &breakdown),
            packing_help: text(self.packing_help),
            stairs_flights: whole(self.stairs_flights.as_ref()).unwrap_or(0),
            additional_fees_cents: whole(self.additional_fees_cents.as_ref()).unwrap_or(0),
        }
    }
}
