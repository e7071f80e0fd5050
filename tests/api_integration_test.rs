//! HTTP-level tests for the transaction API.
//!
//! The router runs against the in-memory store and a fixed seed source, so
//! these tests need neither Postgres nor network access.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use salesboard::app::create_app;
use salesboard::external::seed_source::{SeedSource, SeedSourceError};
use salesboard::models::SeedRecord;
use salesboard::state::AppState;
use salesboard::store::{InMemoryTransactionStore, TransactionStore};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

struct FixedSource(Vec<SeedRecord>);

#[async_trait]
impl SeedSource for FixedSource {
    async fn fetch_records(&self) -> Result<Vec<SeedRecord>, SeedSourceError> {
        Ok(self.0.clone())
    }
}

struct UnreachableSource;

#[async_trait]
impl SeedSource for UnreachableSource {
    async fn fetch_records(&self) -> Result<Vec<SeedRecord>, SeedSourceError> {
        Err(SeedSourceError::Network("dns error".to_string()))
    }
}

fn seed_records() -> Vec<SeedRecord> {
    serde_json::from_value(json!([
        {"id": 1, "title": "Fjallraven Backpack", "description": "Your perfect pack", "price": 50,
         "category": "men's clothing", "image": "a.jpg", "sold": true, "dateOfSale": "2020-03-27T20:29:54+05:30"},
        {"id": 2, "title": "Mens Casual T-Shirt", "description": "Slim-fitting style", "price": 150,
         "category": "men's clothing", "image": "b.jpg", "sold": false, "dateOfSale": "2020-03-05T10:00:00Z"},
        {"id": 3, "title": "Solid Gold Petite Micropave", "description": "Satisfaction guaranteed", "price": 950,
         "category": "jewelery", "image": "c.jpg", "sold": true, "dateOfSale": "2020-03-15T10:00:00Z"},
        {"id": 4, "title": "WD 2TB Elements", "description": "USB 3.0 portable drive", "price": 64,
         "category": "electronics", "image": "d.jpg", "sold": true, "dateOfSale": "2021-07-03T10:00:00Z"}
    ]))
    .unwrap()
}

fn build(source: Arc<dyn SeedSource>) -> (Router, Arc<InMemoryTransactionStore>) {
    let store = Arc::new(InMemoryTransactionStore::new());
    let state = AppState {
        store: store.clone(),
        seed_source: source,
    };
    (create_app(state), store)
}

async fn seeded_app() -> (Router, Arc<InMemoryTransactionStore>) {
    let (app, store) = build(Arc::new(FixedSource(seed_records())));
    let (status, _) = get_text(&app, "/api/init").await;
    assert_eq!(status, StatusCode::OK);
    (app, store)
}

async fn get_text(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn get_json(app: &Router, uri: &str) -> Value {
    let (status, body) = get_text(app, uri).await;
    assert_eq!(status, StatusCode::OK, "unexpected status for {}: {}", uri, body);
    serde_json::from_str(&body).unwrap()
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_init_replaces_store_contents() {
    let (app, store) = build(Arc::new(FixedSource(seed_records())));

    let (status, body) = get_text(&app, "/api/init").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Database initialized with seed data");
    assert_eq!(store.count_all().await.unwrap(), 4);

    // Reseeding is a full replace, not an append.
    get_text(&app, "/api/init").await;
    assert_eq!(store.count_all().await.unwrap(), 4);
}

#[tokio::test]
async fn test_init_failure_is_opaque_500() {
    let (app, store) = build(Arc::new(UnreachableSource));
    let (status, body) = get_text(&app, "/api/init").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Error initializing database");
    assert!(store.is_empty());
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_transactions_for_month() {
    let (app, _) = seeded_app().await;
    let body = get_json(&app, "/api/transactions?month=March").await;

    assert_eq!(body["totalTransactions"], 3);
    assert_eq!(body["totalPages"], 1);
    let txs = body["transactions"].as_array().unwrap();
    assert_eq!(txs.len(), 3);
    assert_eq!(txs[0]["id"], "1");
    assert!(txs[0]["dateOfSale"].is_string());
}

#[tokio::test]
async fn test_transactions_pagination_and_search() {
    let (app, _) = seeded_app().await;

    let page2 = get_json(&app, "/api/transactions?month=March&page=2&perPage=2").await;
    assert_eq!(page2["totalTransactions"], 3);
    assert_eq!(page2["totalPages"], 2);
    assert_eq!(page2["transactions"].as_array().unwrap().len(), 1);

    let search = get_json(&app, "/api/transactions?month=march&search=t-shirt").await;
    assert_eq!(search["totalTransactions"], 1);
    assert_eq!(search["transactions"][0]["id"], "2");

    let by_price = get_json(&app, "/api/transactions?month=March&search=950").await;
    assert_eq!(by_price["totalTransactions"], 1);
    assert_eq!(by_price["transactions"][0]["id"], "3");
}

#[tokio::test]
async fn test_invalid_month_is_rejected() {
    let (app, _) = seeded_app().await;

    let (status, _) = get_text(&app, "/api/transactions?month=Smarch").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_text(&app, "/api/statistics").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_text(&app, "/api/transactions?month=March&perPage=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_statistics() {
    let (app, _) = seeded_app().await;

    let march = get_json(&app, "/api/statistics?month=March").await;
    assert_eq!(
        march,
        json!({"totalSales": 1000.0, "totalSoldItems": 2, "totalNotSoldItems": 1})
    );

    let empty = get_json(&app, "/api/statistics?month=January").await;
    assert_eq!(
        empty,
        json!({"totalSales": 0.0, "totalSoldItems": 0, "totalNotSoldItems": 0})
    );
}

#[tokio::test]
async fn test_bar_chart_scenario() {
    let (app, _) = seeded_app().await;
    let body = get_json(&app, "/api/bar-chart?month=March").await;

    let expected = json!([
        {"range": "0-100", "count": 1},
        {"range": "101-200", "count": 1},
        {"range": "201-300", "count": 0},
        {"range": "301-400", "count": 0},
        {"range": "401-500", "count": 0},
        {"range": "501-600", "count": 0},
        {"range": "601-700", "count": 0},
        {"range": "701-800", "count": 0},
        {"range": "801-900", "count": 0},
        {"range": "901-above", "count": 1}
    ]);
    assert_eq!(body, expected);
}

#[tokio::test]
async fn test_pie_chart() {
    let (app, _) = seeded_app().await;
    let body = get_json(&app, "/api/pie-chart?month=March").await;
    assert_eq!(
        body,
        json!([
            {"category": "men's clothing", "count": 2},
            {"category": "jewelery", "count": 1}
        ])
    );
}

#[tokio::test]
async fn test_combined_matches_individual_endpoints() {
    let (app, _) = seeded_app().await;

    let combined = get_json(&app, "/api/combined?month=March").await;
    assert_eq!(combined["transactions"], get_json(&app, "/api/transactions?month=March").await);
    assert_eq!(combined["statistics"], get_json(&app, "/api/statistics?month=March").await);
    assert_eq!(combined["barChart"], get_json(&app, "/api/bar-chart?month=March").await);
    assert_eq!(combined["pieChart"], get_json(&app, "/api/pie-chart?month=March").await);
}

// ---------------------------------------------------------------------------
// Failures and cross-cutting behavior
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_store_failure_returns_static_messages() {
    let (app, store) = seeded_app().await;
    store.set_unavailable(true);

    let cases = [
        ("/api/transactions?month=March", "Error fetching transactions"),
        ("/api/statistics?month=March", "Error fetching statistics"),
        ("/api/bar-chart?month=March", "Error fetching bar chart data"),
        ("/api/pie-chart?month=March", "Error fetching pie chart data"),
        ("/api/combined?month=March", "Error fetching combined data"),
    ];
    for (uri, message) in cases {
        let (status, body) = get_text(&app, uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert_eq!(body, message);
    }
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let (app, _) = seeded_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/statistics?month=March")
                .header("Origin", "http://dashboard.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_health() {
    let (app, _) = build(Arc::new(FixedSource(vec![])));
    let (status, body) = get_text(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}
