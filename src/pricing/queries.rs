//! Database queries for booking pricing.

use sqlx::PgPool;
use uuid::Uuid;

use super::models::BookingRow;

/// Load the pricing columns of a booking
pub async fn get_booking(pool: &PgPool, booking_id: Uuid) -> Result<Option<BookingRow>, sqlx::Error> {
    sqlx::query_as::<_, BookingRow>(
        r#"
        SELECT
            id, movers, hourly_rate_cents, is_team_rate,
            estimated_hours, bill_additional_hours,
            price_breakdown, heavy_items, packing_help, stairs_flights,
            additional_fees_cents, base_price_cents, total_price_cents,
            updated_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(booking_id)
    .fetch_optional(pool)
    .await
}

/// Write the computed base and total back to the booking.
///
/// Returns the number of rows updated (0 if the booking vanished).
pub async fn update_booking_prices(
    pool: &PgPool,
    booking_id: Uuid,
    base_price_cents: i64,
    total_price_cents: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE bookings
        SET base_price_cents = $2,
            total_price_cents = $3,
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(booking_id)
    .bind(base_price_cents)
    .bind(total_price_cents)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
