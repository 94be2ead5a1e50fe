//! Core quote calculation functions.
//!
//! Pure functions for booking price math - no database access, no shared
//! state. Every money value is integer cents; fractional intermediates are
//! carried as `Decimal` and rounded after each multiplication.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

use super::breakdown::Breakdown;

/// Hours included in the base price before additional-hour billing applies.
pub const BASE_HOURS: i64 = 3;

/// Implied per-mover rates below this are assumed to already be team rates ($20/hour).
pub const TEAM_RATE_THRESHOLD_CENTS: i64 = 2000;

/// Round a cents amount half-up (toward positive infinity).
///
/// Returns 0 when the value does not fit in an `i64`.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use haulers_web::pricing::round_cents;
///
/// assert_eq!(round_cents(dec!(2.5)), 3);
/// assert_eq!(round_cents(dec!(-2.5)), -2);
/// assert_eq!(round_cents(dec!(1666.67)), 1667);
/// ```
pub fn round_cents(amount: Decimal) -> i64 {
    amount
        .checked_add(Decimal::new(5, 1))
        .map(|shifted| shifted.floor())
        .and_then(|rounded| rounded.to_i64())
        .unwrap_or(0)
}

/// Convert a dollar amount to integer cents.
pub fn dollars_to_cents(dollars: Decimal) -> i64 {
    dollars
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(round_cents)
        .unwrap_or(0)
}

/// Multiply a cents amount by a fractional factor, rounding to whole cents.
fn scale_cents(cents: i64, factor: Decimal) -> i64 {
    Decimal::from(cents)
        .checked_mul(factor)
        .map(round_cents)
        .unwrap_or(0)
}

/// An itemised heavy item (piano, safe, ...) attached to a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeavyItem {
    pub price_cents: i64,
    pub count: i64,
}

/// Everything the calculator reads from a booking.
#[derive(Debug, Clone, Default)]
pub struct BookingPricingContext {
    pub movers: Option<i64>,
    pub hourly_rate_cents: Option<i64>,
    pub is_team_rate: Option<bool>,
    pub estimated_hours: Option<Decimal>,
    pub bill_additional_hours: bool,
    pub breakdown: Breakdown,
    pub heavy_items: Vec<HeavyItem>,
    pub packing_help: Option<String>,
    pub stairs_flights: i64,
    pub additional_fees_cents: i64,
}

/// Outcome of per-mover vs. team rate disambiguation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateResolution {
    pub team_hourly_cents: Option<i64>,
    pub per_mover_rate_cents: Option<i64>,
    pub is_team_rate: bool,
}

/// Guess whether a stored rate already covers the whole crew.
///
/// Historical bookings did not record which convention was used. When the
/// implied per-mover rate is under $20/hour the figure is taken as a team rate.
pub fn looks_like_team_rate(hourly_rate_cents: i64, movers: i64) -> bool {
    (hourly_rate_cents as i128) < (TEAM_RATE_THRESHOLD_CENTS as i128) * (movers as i128)
}

/// Derive the crew's hourly rate and the per-mover rate from a stored rate.
///
/// Resolution order:
/// 1. No positive rate: nothing is derivable.
/// 2. Unknown or zero crew size: the stored rate is the team rate.
/// 3. Explicit `is_team_rate` flag: honored as recorded.
/// 4. Otherwise [`looks_like_team_rate`] decides.
pub fn resolve_rate(
    hourly_rate_cents: Option<i64>,
    movers: Option<i64>,
    is_team_rate: Option<bool>,
) -> RateResolution {
    let rate = match hourly_rate_cents {
        Some(rate) if rate > 0 => rate,
        _ => return RateResolution::default(),
    };

    let crew = match movers {
        Some(crew) if crew > 0 => crew,
        _ => {
            return RateResolution {
                team_hourly_cents: Some(rate),
                per_mover_rate_cents: Some(rate),
                is_team_rate: true,
            }
        }
    };

    let team = is_team_rate.unwrap_or_else(|| looks_like_team_rate(rate, crew));

    if team {
        RateResolution {
            team_hourly_cents: Some(rate),
            per_mover_rate_cents: Some(round_cents(
                Decimal::from(rate) / Decimal::from(crew),
            )),
            is_team_rate: true,
        }
    } else {
        RateResolution {
            team_hourly_cents: Some(rate.saturating_mul(crew)),
            per_mover_rate_cents: Some(rate),
            is_team_rate: false,
        }
    }
}

/// Total of an itemised heavy-item list.
pub fn heavy_items_total(items: &[HeavyItem]) -> i64 {
    items
        .iter()
        .map(|item| item.price_cents.max(0).saturating_mul(item.count.max(0)))
        .fold(0i64, i64::saturating_add)
}

/// A single contribution to the total, for itemised display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub key: &'static str,
    pub label: &'static str,
    pub amount_cents: i64,
}

/// Result of a quote calculation
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteResult {
    pub rate: RateResolution,
    pub base_cents: i64,
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
}

impl QuoteResult {
    /// Non-zero contributions in display order.
    pub fn line_items(&self) -> Vec<LineItem> {
        [
            ("base", "Base price (3 hours)", self.base_cents),
            ("additional_hours", "Additional hours", self.additional_hours_cents),
            ("destination_fee", "Destination fee", self.destination_fee_cents),
            ("heavy_items", "Heavy items", self.heavy_items_cents),
            ("packing", "Packing", self.packing_cents),
            ("stairs", "Stairs", self.stairs_cents),
            ("storage", "Storage", self.storage_cents),
            ("insurance", "Insurance", self.insurance_cents),
            ("additional_fees", "Additional fees", self.additional_fees_cents),
        ]
        .into_iter()
        .filter(|(_, _, amount)| *amount != 0)
        .map(|(key, label, amount_cents)| LineItem {
            key,
            label,
            amount_cents,
        })
        .collect()
    }
}

/// Compute a booking's total due and its itemised components.
///
/// Never fails: missing inputs contribute nothing.
pub fn compute_quote(ctx: &BookingPricingContext) -> QuoteResult {
    let rate = resolve_rate(ctx.hourly_rate_cents, ctx.movers, ctx.is_team_rate);
    let base_hours = Decimal::from(BASE_HOURS);

    let base_cents = match (rate.team_hourly_cents, ctx.breakdown.base_hourly_cents) {
        (Some(team), _) => team.saturating_mul(BASE_HOURS),
        (None, Some(base_hourly)) if base_hourly > 0 => base_hourly.saturating_mul(BASE_HOURS),
        _ => 0,
    };

    // Hours past the base window are billed only once the provider confirms them
    let (additional_hours, additional_hours_cents) =
        match (ctx.bill_additional_hours, ctx.estimated_hours, rate.team_hourly_cents) {
            (true, Some(hours), Some(team)) if hours > base_hours => {
                let extra = hours - base_hours;
                (extra, scale_cents(team, extra))
            }
            _ => (Decimal::ZERO, 0),
        };

    let heavy_items_cents = if ctx.heavy_items.is_empty() {
        ctx.breakdown.heavy_items_cents
    } else {
        heavy_items_total(&ctx.heavy_items)
    };

    let packing_requested = ctx
        .packing_help
        .as_deref()
        .map(str::trim)
        .is_some_and(|level| !level.is_empty() && !level.eq_ignore_ascii_case("none"));
    let packing_cents = if packing_requested {
        ctx.breakdown.packing_cents
    } else {
        0
    };

    let stairs_cents = if ctx.stairs_flights > 0 {
        ctx.breakdown.stairs_cents
    } else {
        0
    };

    let storage_cents = ctx.breakdown.storage_cents.max(0);
    let insurance_cents = ctx.breakdown.insurance_cents.max(0);
    let destination_fee_cents = ctx.breakdown.destination_fee_cents;

    let total_due_cents = [
        base_cents,
        additional_hours_cents,
        destination_fee_cents,
        heavy_items_cents,
        packing_cents,
        stairs_cents,
        storage_cents,
        insurance_cents,
        ctx.additional_fees_cents,
    ]
    .into_iter()
    .fold(0i64, i64::saturating_add);

    QuoteResult {
        rate,
        base_cents,
        additional_hours,
        additional_hours_cents,
        destination_fee_cents,
        heavy_items_cents,
        packing_cents,
        stairs_cents,
        storage_cents,
        insurance_cents,
        additional_fees_cents: ctx.additional_fees_cents,
        total_due_cents,
    }
}
