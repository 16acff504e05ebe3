//! Durable-watchlist and simulated-portfolio endpoints.
//!
//! Durable routes hit the DuckDB store; simulated routes hit the in-memory
//! ledger. All responses carry `{"success": bool, ..}` so the frontend can
//! branch on one field.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use time::OffsetDateTime;

use foliotrack_core::{insights, Symbol};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StockRequest {
    pub user_id: String,
    pub symbol: String,
}

fn failure(message: impl Into<String>) -> Json<Value> {
    Json(json!({ "success": false, "message": message.into() }))
}

fn success(message: impl Into<String>) -> Json<Value> {
    Json(json!({ "success": true, "message": message.into() }))
}

/// `POST /api/portfolio/add`
pub async fn add_stock(
    State(state): State<AppState>,
    Json(request): Json<StockRequest>,
) -> Json<Value> {
    let symbol = match Symbol::parse(&request.symbol) {
        Ok(symbol) => symbol,
        Err(error) => return failure(error.to_string()),
    };

    tracing::info!(user_id = %request.user_id, symbol = %symbol, "adding stock to portfolio");
    match state.store.add(&request.user_id, symbol.as_str()) {
        Ok(true) => success(format!("{symbol} added to portfolio.")),
        Ok(false) => failure(format!("{symbol} already exists in portfolio.")),
        Err(error) => {
            tracing::error!(%error, "portfolio add failed");
            failure(error.to_string())
        }
    }
}

/// `DELETE /api/portfolio/remove`
pub async fn remove_stock(
    State(state): State<AppState>,
    Json(request): Json<StockRequest>,
) -> Json<Value> {
    let symbol = match Symbol::parse(&request.symbol) {
        Ok(symbol) => symbol,
        Err(error) => return failure(error.to_string()),
    };

    match state.store.remove(&request.user_id, symbol.as_str()) {
        Ok(true) => success(format!("{symbol} removed from portfolio.")),
        Ok(false) => failure("Stock not found in portfolio."),
        Err(error) => {
            tracing::error!(%error, "portfolio remove failed");
            failure(error.to_string())
        }
    }
}

/// `GET /api/portfolio/:user_id`
///
/// Always returns a `portfolio` key, even for unknown users, so the frontend
/// never branches on a missing field.
pub async fn get_portfolio(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Value> {
    tracing::info!(user_id = %user_id, "fetching portfolio");
    match state.store.list(&user_id) {
        Ok(entries) => {
            let symbols: Vec<Value> = entries
                .iter()
                .map(|entry| json!({ "symbol": entry.symbol }))
                .collect();
            Json(json!({ "success": true, "portfolio": symbols }))
        }
        Err(error) => {
            tracing::error!(%error, "portfolio list failed");
            failure(error.to_string())
        }
    }
}

/// `GET /api/simulated-portfolio/:user_id`
///
/// Unknown users hold an empty portfolio rather than erroring.
pub async fn simulated_holdings(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Value> {
    let holdings = state.ledger.holdings(&user_id).await;
    Json(json!({ "success": true, "portfolio": holdings }))
}

#[derive(Debug, Deserialize)]
pub struct BuyRequest {
    pub user_id: String,
    pub symbol: String,
    pub price: f64,
    pub quantity: u32,
}

/// `POST /api/simulated-portfolio/buy`
pub async fn buy_stock(
    State(state): State<AppState>,
    Json(request): Json<BuyRequest>,
) -> Json<Value> {
    let symbol = match Symbol::parse(&request.symbol) {
        Ok(symbol) => symbol,
        Err(error) => return failure(error.to_string()),
    };

    match state
        .ledger
        .buy(&request.user_id, symbol.clone(), request.price, request.quantity)
        .await
    {
        Ok(_) => success(format!("Bought {symbol} in simulated portfolio.")),
        Err(error) => failure(error.to_string()),
    }
}

#[derive(Debug, Deserialize)]
pub struct SellRequest {
    pub user_id: String,
    pub symbol: String,
    pub quantity: u32,
}

/// `POST /api/simulated-portfolio/sell`
pub async fn sell_stock(
    State(state): State<AppState>,
    Json(request): Json<SellRequest>,
) -> Json<Value> {
    let symbol = match Symbol::parse(&request.symbol) {
        Ok(symbol) => symbol,
        Err(error) => return failure(error.to_string()),
    };

    match state
        .ledger
        .sell(&request.user_id, &symbol, request.quantity)
        .await
    {
        Ok(()) => success(format!(
            "Sold {} shares of {symbol}.",
            request.quantity
        )),
        Err(error) => failure(error.to_string()),
    }
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// `POST /api/simulated-portfolio/reset`
pub async fn reset_portfolio(
    State(state): State<AppState>,
    Json(request): Json<ResetRequest>,
) -> Json<Value> {
    let Some(user_id) = request.user_id.filter(|id| !id.is_empty()) else {
        return failure("Missing user_id");
    };

    state.ledger.reset(&user_id).await;
    success("Simulated portfolio reset.")
}

/// `GET /api/portfolio/history/:user_id`
pub async fn portfolio_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Value> {
    let holdings = state.ledger.holdings(&user_id).await;
    let today = OffsetDateTime::now_utc().date();
    let history = insights::value_history(state.market.as_ref(), &holdings, today).await;
    Json(json!({ "success": true, "history": history }))
}

/// `GET /api/portfolio/sector-allocation/:user_id`
pub async fn sector_allocation(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Value> {
    let holdings = state.ledger.holdings(&user_id).await;
    let sectors = insights::sector_allocation(state.market.as_ref(), &holdings).await;
    Json(json!({ "success": true, "sectors": sectors }))
}
