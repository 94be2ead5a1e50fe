//! Booking pricing module.
//!
//! Derives a booking's total due in integer cents from crew size, hourly
//! rate, duration and the stored surcharge breakdown, and writes the result
//! back to the booking record.

pub mod breakdown;
pub mod calculators;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use breakdown::Breakdown;
pub use calculators::{
    compute_quote, resolve_rate, round_cents, BookingPricingContext, HeavyItem, QuoteResult,
    RateResolution, BASE_HOURS, TEAM_RATE_THRESHOLD_CENTS,
};
pub use routes::router;
pub use services::{BookingQuote, PricingError};
