//! HTTP route tree.
//!
//! Every endpoint returns HTTP 200 with a JSON body; logical failures are
//! reported in the payload (`{"error": ..}` or `{"success": false, ..}`)
//! rather than through status codes. The frontend renders these inline and
//! never branches on status.

mod insights;
mod market;
mod portfolio;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/predict", get(insights::predict))
        .route("/stock/:ticker", get(insights::stock_price))
        .route("/api/stockprice/:ticker", get(insights::stock_price))
        .route("/api/market-overview", get(market::market_overview))
        .route("/api/portfolio/add", post(portfolio::add_stock))
        .route("/api/portfolio/remove", delete(portfolio::remove_stock))
        .route(
            "/api/portfolio/history/:user_id",
            get(portfolio::portfolio_history),
        )
        .route(
            "/api/portfolio/sector-allocation/:user_id",
            get(portfolio::sector_allocation),
        )
        .route("/api/portfolio/:user_id", get(portfolio::get_portfolio))
        .route("/api/simulated-portfolio/buy", post(portfolio::buy_stock))
        .route("/api/simulated-portfolio/sell", post(portfolio::sell_stock))
        .route("/api/simulated-portfolio/reset", post(portfolio::reset_portfolio))
        .route(
            "/api/simulated-portfolio/:user_id",
            get(portfolio::simulated_holdings),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
