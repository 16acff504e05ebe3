//! Behavior tests for the HTTP surface.
//!
//! Each test drives the full router with in-process requests; upstream data
//! comes from the scripted market so no network is involved.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use foliotrack_tests::{down_router, test_router};

async fn get_json(app: &Router, uri: &str) -> Value {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    send(app, request).await
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> Value {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> Value {
    let response = app.clone().oneshot(request).await.expect("response");
    // Logical failures ride in the payload; the status is always 200.
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

// =============================================================================
// Prediction: per-ticker independence
// =============================================================================

#[tokio::test]
async fn when_one_ticker_fails_the_others_still_forecast() {
    let dir = TempDir::new().expect("tempdir");
    let app = test_router(&dir);

    // Given: a batch with one good and one failing ticker
    let body = get_json(&app, "/predict?tickers=AAPL,ZZZINVALID").await;

    // Then: AAPL forecasts normally
    let aapl = &body["AAPL"];
    assert_eq!(aapl["ticker"], "AAPL");
    assert_eq!(aapl["predictions"].as_array().expect("predictions").len(), 7);

    // And: ZZZINVALID reports its own error without disturbing AAPL
    assert!(body["ZZZINVALID"]["error"]
        .as_str()
        .expect("error message")
        .contains("ZZZINVALID"));
}

#[tokio::test]
async fn when_a_ticker_is_malformed_the_entry_is_an_error_not_a_rejection() {
    let dir = TempDir::new().expect("tempdir");
    let app = test_router(&dir);

    let body = get_json(&app, "/predict?tickers=AAPL,.BAD").await;

    assert!(body["AAPL"]["predictions"].is_array());
    assert!(body[".BAD"]["error"].is_string());
}

// =============================================================================
// Spot quotes
// =============================================================================

#[tokio::test]
async fn spot_quote_is_served_on_both_route_spellings() {
    let dir = TempDir::new().expect("tempdir");
    let app = test_router(&dir);

    for uri in ["/api/stockprice/AAPL", "/stock/AAPL"] {
        let body = get_json(&app, uri).await;
        assert_eq!(body["ticker"], "AAPL");
        assert_eq!(body["price"], 200.0);
        assert_eq!(body["change_percent"], 0.5);
    }
}

#[tokio::test]
async fn failed_spot_lookup_reports_an_error_payload() {
    let dir = TempDir::new().expect("tempdir");
    let app = test_router(&dir);

    let body = get_json(&app, "/api/stockprice/ZED").await;
    assert!(body["error"].as_str().expect("error").contains("ZED"));
}

#[tokio::test]
async fn market_overview_renders_every_index_row() {
    let dir = TempDir::new().expect("tempdir");
    let app = test_router(&dir);

    let body = get_json(&app, "/api/market-overview").await;
    let rows = body.as_array().expect("array");
    assert_eq!(rows.len(), 8);
    assert_eq!(rows[0]["name"], "S&P 500");
    assert_eq!(rows[0]["price"], "$200.00");
    assert_eq!(rows[0]["change"], "0.50%");
    assert_eq!(rows[0]["positive"], true);
}

#[tokio::test]
async fn market_overview_renders_na_rows_when_the_upstream_is_down() {
    let dir = TempDir::new().expect("tempdir");
    let app = down_router(&dir);

    // Every index lookup fails; the layout must survive with placeholders.
    let body = get_json(&app, "/api/market-overview").await;
    let rows = body.as_array().expect("array");
    assert_eq!(rows.len(), 8);
    for row in rows {
        assert_eq!(row["price"], "N/A");
        assert_eq!(row["change"], "N/A");
        assert_eq!(row["positive"], serde_json::Value::Null);
    }
}

// =============================================================================
// Durable watchlist
// =============================================================================

#[tokio::test]
async fn watchlist_add_duplicate_list_and_remove_round_trip() {
    let dir = TempDir::new().expect("tempdir");
    let app = test_router(&dir);

    let added = send_json(
        &app,
        "POST",
        "/api/portfolio/add",
        json!({"user_id": "u1", "symbol": "aapl"}),
    )
    .await;
    assert_eq!(added["success"], true);

    // Duplicate add is refused, not upserted
    let duplicate = send_json(
        &app,
        "POST",
        "/api/portfolio/add",
        json!({"user_id": "u1", "symbol": "AAPL"}),
    )
    .await;
    assert_eq!(duplicate["success"], false);

    let listed = get_json(&app, "/api/portfolio/u1").await;
    assert_eq!(listed["success"], true);
    assert_eq!(listed["portfolio"], json!([{"symbol": "AAPL"}]));

    let removed = send_json(
        &app,
        "DELETE",
        "/api/portfolio/remove",
        json!({"user_id": "u1", "symbol": "AAPL"}),
    )
    .await;
    assert_eq!(removed["success"], true);

    let empty = get_json(&app, "/api/portfolio/u1").await;
    assert_eq!(empty["portfolio"], json!([]));
}

#[tokio::test]
async fn unknown_users_get_an_empty_watchlist_not_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let app = test_router(&dir);

    let body = get_json(&app, "/api/portfolio/nobody").await;
    assert_eq!(body["success"], true);
    assert_eq!(body["portfolio"], json!([]));
}

// =============================================================================
// Simulated trading
// =============================================================================

#[tokio::test]
async fn buying_twice_merges_into_one_weighted_average_lot() {
    let dir = TempDir::new().expect("tempdir");
    let app = test_router(&dir);

    for (price, quantity) in [(100.0, 10), (200.0, 10)] {
        let bought = send_json(
            &app,
            "POST",
            "/api/simulated-portfolio/buy",
            json!({"user_id": "u1", "symbol": "AAPL", "price": price, "quantity": quantity}),
        )
        .await;
        assert_eq!(bought["success"], true);
    }

    let holdings = get_json(&app, "/api/simulated-portfolio/u1").await;
    assert_eq!(
        holdings["portfolio"],
        json!([{"symbol": "AAPL", "quantity": 20, "average_price": 150.0}])
    );
}

#[tokio::test]
async fn overselling_is_refused_and_the_lot_survives() {
    let dir = TempDir::new().expect("tempdir");
    let app = test_router(&dir);

    send_json(
        &app,
        "POST",
        "/api/simulated-portfolio/buy",
        json!({"user_id": "u1", "symbol": "AAPL", "price": 100.0, "quantity": 5}),
    )
    .await;

    let oversell = send_json(
        &app,
        "POST",
        "/api/simulated-portfolio/sell",
        json!({"user_id": "u1", "symbol": "AAPL", "quantity": 9}),
    )
    .await;
    assert_eq!(oversell["success"], false);

    let holdings = get_json(&app, "/api/simulated-portfolio/u1").await;
    assert_eq!(holdings["portfolio"][0]["quantity"], 5);
}

#[tokio::test]
async fn selling_the_full_position_removes_the_lot() {
    let dir = TempDir::new().expect("tempdir");
    let app = test_router(&dir);

    send_json(
        &app,
        "POST",
        "/api/simulated-portfolio/buy",
        json!({"user_id": "u1", "symbol": "AAPL", "price": 100.0, "quantity": 5}),
    )
    .await;

    let sold = send_json(
        &app,
        "POST",
        "/api/simulated-portfolio/sell",
        json!({"user_id": "u1", "symbol": "AAPL", "quantity": 5}),
    )
    .await;
    assert_eq!(sold["success"], true);

    let holdings = get_json(&app, "/api/simulated-portfolio/u1").await;
    assert_eq!(holdings["portfolio"], json!([]));
}

#[tokio::test]
async fn reset_requires_a_user_id() {
    let dir = TempDir::new().expect("tempdir");
    let app = test_router(&dir);

    let missing = send_json(&app, "POST", "/api/simulated-portfolio/reset", json!({})).await;
    assert_eq!(missing["success"], false);

    send_json(
        &app,
        "POST",
        "/api/simulated-portfolio/buy",
        json!({"user_id": "u1", "symbol": "AAPL", "price": 100.0, "quantity": 5}),
    )
    .await;
    let reset = send_json(
        &app,
        "POST",
        "/api/simulated-portfolio/reset",
        json!({"user_id": "u1"}),
    )
    .await;
    assert_eq!(reset["success"], true);

    let holdings = get_json(&app, "/api/simulated-portfolio/u1").await;
    assert_eq!(holdings["portfolio"], json!([]));
}

// =============================================================================
// Insights
// =============================================================================

#[tokio::test]
async fn history_covers_only_weekdays_in_the_window() {
    let dir = TempDir::new().expect("tempdir");
    let app = test_router(&dir);

    send_json(
        &app,
        "POST",
        "/api/simulated-portfolio/buy",
        json!({"user_id": "u1", "symbol": "AAPL", "price": 100.0, "quantity": 10}),
    )
    .await;

    let body = get_json(&app, "/api/portfolio/history/u1").await;
    assert_eq!(body["success"], true);
    // Any 7 consecutive calendar days contain exactly 5 weekdays.
    let history = body["history"].as_array().expect("history");
    assert_eq!(history.len(), 5);
    for entry in history {
        assert!(entry["date"].is_string());
        assert!(entry["value"].is_number());
    }
}

#[tokio::test]
async fn sector_allocation_folds_failures_into_unknown() {
    let dir = TempDir::new().expect("tempdir");
    let app = test_router(&dir);

    for (symbol, quantity) in [("AAPL", 10), ("MSFT", 5), ("ZED", 3)] {
        send_json(
            &app,
            "POST",
            "/api/simulated-portfolio/buy",
            json!({"user_id": "u1", "symbol": symbol, "price": 50.0, "quantity": quantity}),
        )
        .await;
    }

    let body = get_json(&app, "/api/portfolio/sector-allocation/u1").await;
    assert_eq!(
        body["sectors"],
        json!([
            {"sector": "Technology", "value": 15},
            {"sector": "Unknown", "value": 3}
        ])
    );
}
