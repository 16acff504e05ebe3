//! Twelve Data spot-quote adapter.
//!
//! Uses the `time_series` endpoint with `outputsize=2` so a single call
//! yields both the latest close and the previous close, from which the
//! day-over-day percent change is derived.

use std::sync::Arc;

use serde::Deserialize;

use crate::adapters::symbol_seed;
use crate::{round_price, HttpClient, HttpRequest, MarketError, SpotQuote, Symbol};

const BASE_URL: &str = "https://api.twelvedata.com";

/// Spot-price client for the Twelve Data API.
pub struct TwelveDataClient {
    http: Arc<dyn HttpClient>,
    api_key: String,
    use_real_api: bool,
}

impl TwelveDataClient {
    pub fn new(http: Arc<dyn HttpClient>, api_key: impl Into<String>) -> Self {
        let use_real_api = !http.is_mock();
        Self {
            http,
            api_key: api_key.into(),
            use_real_api,
        }
    }

    /// Latest spot price with day-over-day percent change.
    ///
    /// # Errors
    ///
    /// [`MarketError::NoData`] when the provider returns no rows,
    /// [`MarketError::Upstream`] on transport failure or a malformed payload.
    pub async fn spot(&self, symbol: &Symbol) -> Result<SpotQuote, MarketError> {
        if self.use_real_api {
            self.fetch_real_spot(symbol).await
        } else {
            Ok(fake_spot(symbol))
        }
    }

    async fn fetch_real_spot(&self, symbol: &Symbol) -> Result<SpotQuote, MarketError> {
        let url = format!(
            "{}/time_series?symbol={}&interval=1day&outputsize=2&apikey={}",
            BASE_URL,
            urlencoding::encode(symbol.as_str()),
            urlencoding::encode(&self.api_key),
        );

        let response = self
            .http
            .execute(HttpRequest::get(url))
            .await
            .map_err(|e| MarketError::Upstream(format!("twelvedata request failed: {e}")))?;

        if !response.is_success() {
            return Err(MarketError::Upstream(format!(
                "twelvedata returned status {}",
                response.status
            )));
        }

        parse_spot(symbol, &response.body)
    }
}

#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    #[serde(default)]
    values: Vec<TimeSeriesValue>,
}

#[derive(Debug, Deserialize)]
struct TimeSeriesValue {
    datetime: String,
    close: String,
}

fn parse_spot(symbol: &Symbol, body: &str) -> Result<SpotQuote, MarketError> {
    let payload: TimeSeriesResponse = serde_json::from_str(body)
        .map_err(|e| MarketError::Upstream(format!("malformed twelvedata payload: {e}")))?;

    // Rows arrive newest-first.
    let Some(latest) = payload.values.first() else {
        return Err(MarketError::NoData {
            ticker: symbol.to_string(),
        });
    };
    let price = round_price(parse_close(&latest.close)?);

    let change_percent = match payload.values.get(1) {
        Some(previous) => {
            let previous_close = parse_close(&previous.close)?;
            if previous_close == 0.0 {
                None
            } else {
                Some(round_price(
                    (price - previous_close) / previous_close * 100.0,
                ))
            }
        }
        None => None,
    };

    Ok(SpotQuote {
        ticker: symbol.clone(),
        price,
        date: latest.datetime.clone(),
        change_percent,
    })
}

fn parse_close(raw: &str) -> Result<f64, MarketError> {
    raw.trim().parse().map_err(|_| MarketError::Parse {
        field: "close",
        value: raw.to_owned(),
    })
}

fn fake_spot(symbol: &Symbol) -> SpotQuote {
    let seed = symbol_seed(symbol);
    let price = round_price(25.0 + (seed % 475) as f64 + (seed % 100) as f64 / 100.0);
    let change_percent = round_price((seed % 11) as f64 - 5.0);
    SpotQuote {
        ticker: symbol.clone(),
        price,
        date: String::from("2026-01-02"),
        change_percent: Some(change_percent),
    }
}
