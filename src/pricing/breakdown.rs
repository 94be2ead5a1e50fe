//! Normalisation of stored price breakdowns.
//!
//! Bookings written over the years used several names for the same
//! surcharge, and some stored dollars while others stored cents. All of that
//! probing happens here, once, so the calculator only sees a typed
//! [`Breakdown`] in cents.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

use super::calculators::{dollars_to_cents, round_cents, HeavyItem};

const BASE_HOURLY_KEYS: &[&str] = &[
    "base_hourly_cents",
    "baseHourlyCents",
    "base_hourly",
    "baseHourly",
    "base_hourly_rate",
];

const DESTINATION_FEE_KEYS: &[&str] = &[
    "destination_fee_cents",
    "destinationFeeCents",
    "destination_fee",
    "destinationFee",
    "long_distance_fee",
];

const HEAVY_ITEMS_KEYS: &[&str] = &[
    "heavy_items_cents",
    "heavyItemsCents",
    "heavy_items_cost",
    "heavyItemsCost",
    "heavy_items",
];

const PACKING_KEYS: &[&str] = &[
    "packing_cents",
    "packingCents",
    "packing_cost",
    "packingCost",
    "packing",
];

const STAIRS_KEYS: &[&str] = &[
    "stairs_cents",
    "stairsCents",
    "stairs_cost",
    "stairsCost",
    "stairs",
];

const STORAGE_KEYS: &[&str] = &[
    "storage_cents",
    "storageCents",
    "storage_cost",
    "storageCost",
    "storage",
];

const INSURANCE_KEYS: &[&str] = &[
    "insurance_cents",
    "insuranceCents",
    "insurance_cost",
    "insuranceCost",
    "insurance",
];

const ITEMISED_HEAVY_KEYS: &[&str] = &["heavy_items", "heavyItems"];

/// Surcharge amounts in cents, after key probing and unit normalisation.
///
/// Every amount is non-negative; unreadable values are 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub base_hourly_cents: Option<i64>,
    pub destination_fee_cents: i64,
    pub heavy_items_cents: i64,
    pub packing_cents: i64,
    pub stairs_cents: i64,
    pub storage_cents: i64,
    pub insurance_cents: i64,
}

impl Breakdown {
    /// Build a breakdown from a raw JSON map. Non-objects yield an empty breakdown.
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };

        Self {
            base_hourly_cents: probe(map, BASE_HOURLY_KEYS),
            destination_fee_cents: probe(map, DESTINATION_FEE_KEYS).unwrap_or(0),
            heavy_items_cents: probe(map, HEAVY_ITEMS_KEYS).unwrap_or(0),
            packing_cents: probe(map, PACKING_KEYS).unwrap_or(0),
            stairs_cents: probe(map, STAIRS_KEYS).unwrap_or(0),
            storage_cents: probe(map, STORAGE_KEYS).unwrap_or(0),
            insurance_cents: probe(map, INSURANCE_KEYS).unwrap_or(0),
        }
    }
}

/// First present, non-null key wins; its value is converted by key name.
fn probe(map: &Map<String, Value>, keys: &[&str]) -> Option<i64> {
    keys.iter().find_map(|key| match map.get(*key) {
        None | Some(Value::Null) => None,
        Some(value) => Some(amount_cents(key, value)),
    })
}

/// Convert a stored amount to cents.
///
/// Keys mentioning "cents" hold cents; everything else holds dollars.
/// Negative and unreadable values are 0.
pub fn amount_cents(key: &str, value: &Value) -> i64 {
    let Some(amount) = parse_decimal(value) else {
        return 0;
    };
    if amount <= Decimal::ZERO {
        return 0;
    }

    if key.to_ascii_lowercase().contains("cents") {
        round_cents(amount)
    } else {
        dollars_to_cents(amount)
    }
}

/// Read a JSON number or numeric string ("12.50", " $12.50 ").
pub fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(Decimal::from(i)),
            None => n.as_f64().and_then(|f| Decimal::try_from(f).ok()),
        },
        Value::String(s) => {
            let trimmed = s.trim();
            let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
            trimmed.parse::<Decimal>().ok()
        }
        _ => None,
    }
}

/// Parse an itemised heavy-item list (`[{"price_cents": 15000, "count": 1}, ...]`).
///
/// Entries without a readable price are skipped. A missing count means one item.
pub fn parse_heavy_items(value: &Value) -> Vec<HeavyItem> {
    let Some(entries) = value.as_array() else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let item = entry.as_object()?;
            let price = field(item, &["price_cents", "priceCents"]).and_then(parse_decimal)?;
            let count = match field(item, &["count", "quantity"]) {
                None => Decimal::ONE,
                Some(value) => parse_decimal(value).unwrap_or(Decimal::ZERO),
            };
            Some(HeavyItem {
                price_cents: round_cents(price).max(0),
                count: round_cents(count).max(0),
            })
        })
        .collect()
}

/// Itemised heavy items from a dedicated column, falling back to a list
/// nested inside the breakdown map.
pub fn itemised_heavy_items(column: Option<&Value>, breakdown: &Value) -> Vec<HeavyItem> {
    let items = column.map(parse_heavy_items).unwrap_or_default();
    if !items.is_empty() {
        return items;
    }

    breakdown
        .as_object()
        .and_then(|map| field(map, ITEMISED_HEAVY_KEYS))
        .map(parse_heavy_items)
        .unwrap_or_default()
}

fn field<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|key| map.get(*key).filter(|value| !value.is_null()))
}
