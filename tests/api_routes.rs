//! Router tests for endpoints that can be served without a database.
//!
//! The pool connects lazily to a closed port, so anything that reaches
//! Postgres fails; these tests cover stateless handlers, cache-served reads
//! and the store-down error path.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use haulers_web::cache::{AppCache, ProviderPage};
use haulers_web::config::Config;
use haulers_web::models::{LedgerLine, LedgerSummary, ProviderSummary};
use haulers_web::{app, AppState};

fn test_state() -> AppState {
    state_with(&[])
}

fn state_with(vars: &'static [(&'static str, &'static str)]) -> AppState {
    let config = Config::from_lookup(|name| match name {
        "DATABASE_URL" => Some("postgres://localhost:1/haulers_test".to_string()),
        _ => vars
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string()),
    })
    .unwrap();
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(500))
        .connect_lazy(&config.database_url)
        .unwrap();
    AppState::new(pool, config)
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(app(test_state()), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_quote_team_rate() {
    let request = post_json(
        "/api/pricing/quote",
        json!({
            "movers": 2,
            "hourly_rate_cents": 15000,
            "is_team_rate": true,
            "estimated_hours": 3,
        }),
    );

    let (status, body) = send(app(test_state()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_due_cents"], 45000);
    assert_eq!(body["base_cents"], 45000);
    assert_eq!(body["total"]["amount"], "450.00");
    assert_eq!(body["line_items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_quote_with_surcharges_and_confirmed_hours() {
    let request = post_json(
        "/api/pricing/quote",
        json!({
            "movers": 2,
            "hourlyRateCents": 6000,
            "estimatedHours": "5",
            "billAdditionalHours": true,
            "packingHelp": "partial",
            "stairsFlights": 1,
            "additionalFeesCents": 500,
            "breakdown": {
                "destinationFee": 40,
                "packing_cents": 7000,
                "stairs_cost": "25",
                "storage_cents": 0,
                "insurance": 15,
            },
            "heavyItems": [{"price_cents": 10000, "count": 2}],
        }),
    );

    let (status, body) = send(app(test_state()), request).await;
    assert_eq!(status, StatusCode::OK);
    // 6000 per mover x 2 = 12000 team rate
    assert_eq!(body["team_hourly_cents"], 12000);
    assert_eq!(body["is_team_rate"], false);
    assert_eq!(body["base_cents"], 36000);
    assert_eq!(body["additional_hours_cents"], 24000);
    assert_eq!(body["destination_fee_cents"], 4000);
    assert_eq!(body["heavy_items_cents"], 20000);
    assert_eq!(body["packing_cents"], 7000);
    assert_eq!(body["stairs_cents"], 2500);
    assert_eq!(body["storage_cents"], 0);
    assert_eq!(body["insurance_cents"], 1500);
    assert_eq!(
        body["total_due_cents"],
        36000 + 24000 + 4000 + 20000 + 7000 + 2500 + 1500 + 500
    );
}

#[tokio::test]
async fn test_quote_non_string_packing_help_is_ignored() {
    let request = post_json(
        "/api/pricing/quote",
        json!({
            "movers": 2,
            "hourly_rate_cents": 15000,
            "is_team_rate": true,
            "packing_help": true,
        }),
    );

    let (status, body) = send(app(test_state()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_due_cents"], 45000);
    assert_eq!(body["packing_cents"], 0);
}

#[tokio::test]
async fn test_quote_garbage_input_degrades_to_zero() {
    let request = post_json(
        "/api/pricing/quote",
        json!({
            "movers": "many",
            "hourly_rate_cents": {"cents": 100},
            "breakdown": "not a map",
        }),
    );

    let (status, body) = send(app(test_state()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_due_cents"], 0);
    assert!(body["team_hourly_cents"].is_null());
}

#[tokio::test]
async fn test_quote_rejects_malformed_json() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/pricing/quote")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, _) = send(app(test_state()), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_booking_quote_rejects_bad_id() {
    let (status, _) = send(app(test_state()), get("/api/bookings/not-a-uuid/quote")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recalculate_with_store_down_is_bad_gateway() {
    let uri = format!("/api/bookings/{}/recalculate", uuid::Uuid::new_v4());
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app(test_state()), request).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error_type"], "pricing_store_error");
}

#[tokio::test]
async fn test_providers_served_from_cache() {
    let state = test_state();
    let provider = ProviderSummary {
        id: uuid::Uuid::new_v4(),
        business_name: "Two Trucks Moving".to_string(),
        category_slug: Some("movers".to_string()),
        category_name: Some("Movers".to_string()),
        city: Some("Austin".to_string()),
        hourly_rate_cents: Some(15000),
        rating: Some(4.8),
        review_count: 12,
        verified: true,
    };
    state
        .cache
        .provider_listings
        .insert(
            AppCache::provider_listing_key(Some("movers"), 1),
            Arc::new(ProviderPage {
                providers: vec![provider],
                total: 13,
            }),
        )
        .await;

    let (status, body) = send(app(state), get("/api/providers?category=Movers&page=0")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["category"], "movers");
    assert_eq!(body["total_pages"], 2);
    assert_eq!(body["has_next"], true);
    assert_eq!(body["has_previous"], false);
    assert_eq!(body["providers"][0]["business_name"], "Two Trucks Moving");
}

#[tokio::test]
async fn test_providers_rejects_bad_category() {
    let (status, body) = send(
        app(test_state()),
        get("/api/providers?category=movers%3Bdrop"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "bad_request");
}

#[tokio::test]
async fn test_ledger_served_from_cache() {
    let state = test_state();
    let summary = LedgerSummary::from_lines(vec![
        LedgerLine {
            category: "booking_fees".to_string(),
            kind: "income".to_string(),
            total_cents: 50000,
            entry_count: 4,
        },
        LedgerLine {
            category: "hosting".to_string(),
            kind: "expense".to_string(),
            total_cents: 20000,
            entry_count: 1,
        },
    ]);
    state
        .cache
        .ledger
        .insert(AppCache::ledger_key(), Arc::new(summary))
        .await;

    let (status, body) = send(app(state), get("/api/ledger")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["net_cents"], 30000);
    assert_eq!(body["lines"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_cache_admin_routes_hidden_by_default() {
    let state = test_state();
    state
        .cache
        .ledger
        .insert(
            AppCache::ledger_key(),
            Arc::new(LedgerSummary::from_lines(Vec::new())),
        )
        .await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/cache/invalidate")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app(state.clone()), request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(state.cache.ledger.get("ledger").await.is_some());

    let (status, _) = send(app(state), get("/api/cache/stats")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cache_invalidate_and_stats() {
    let state = state_with(&[("ENABLE_CACHE_ADMIN", "true")]);
    state
        .cache
        .provider_listings
        .insert(
            AppCache::provider_listing_key(None, 1),
            Arc::new(ProviderPage {
                providers: Vec::new(),
                total: 0,
            }),
        )
        .await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/cache/invalidate")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app(state.clone()), request).await;
    assert_eq!(status, StatusCode::OK);

    assert!(state
        .cache
        .provider_listings
        .get("providers:all:1")
        .await
        .is_none());

    let (status, body) = send(app(state), get("/api/cache/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ledger_cached"], false);
}
