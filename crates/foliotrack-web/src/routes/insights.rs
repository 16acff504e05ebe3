//! Forecast and spot-price endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use foliotrack_core::{
    forecast, series, Forecast, Lookback, MarketError, SpotQuote, Symbol, DEFAULT_HORIZON_DAYS,
};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PredictParams {
    pub tickers: String,
}

/// `GET /predict?tickers=A,B,C`
///
/// Tickers are forecast independently; one failing symbol yields an
/// `{"error": ..}` entry without disturbing its siblings. Map keys are the
/// caller's spellings, not the normalized symbols.
pub async fn predict(
    State(state): State<AppState>,
    Query(params): Query<PredictParams>,
) -> Json<Value> {
    let mut results = Map::new();
    for raw in params.tickers.split(',') {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let entry = match forecast_for(&state, raw).await {
            Ok(forecast) => json!(forecast),
            Err(error) => {
                tracing::warn!(ticker = raw, %error, "prediction failed");
                json!({ "error": error.to_string() })
            }
        };
        results.insert(raw.to_owned(), entry);
    }
    Json(Value::Object(results))
}

async fn forecast_for(state: &AppState, raw: &str) -> Result<Forecast, MarketError> {
    let symbol = Symbol::parse(raw)?;
    let rows = state.market.history(&symbol, Lookback::SixMonths).await?;
    let series = series::normalize(symbol, rows)?;
    forecast::forecast(&series, DEFAULT_HORIZON_DAYS)
}

/// `GET /api/stockprice/:ticker` and `GET /stock/:ticker`
///
/// Served through the quote cache; a hit skips the upstream call entirely.
pub async fn stock_price(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Json<Value> {
    match spot_for(&state, &ticker).await {
        Ok(quote) => Json(json!(quote)),
        Err(error) => {
            tracing::warn!(ticker = %ticker, %error, "spot quote failed");
            Json(json!({ "error": error.to_string() }))
        }
    }
}

pub(crate) async fn spot_for(state: &AppState, raw: &str) -> Result<SpotQuote, MarketError> {
    let symbol = Symbol::parse(raw)?;
    if let Some(quote) = state.quotes.get(symbol.as_str()).await {
        return Ok(quote);
    }

    let quote = state.market.spot(&symbol).await?;
    state.quotes.put(quote.clone()).await;
    Ok(quote)
}
