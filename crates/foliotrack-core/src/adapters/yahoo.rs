//! Yahoo Finance chart adapter: daily history and sector classification.
//!
//! History comes from the `v8/finance/chart` endpoint, which returns parallel
//! arrays of epoch-second timestamps and closes. Rows with a null close
//! (halts, partial sessions) are dropped at the edge so downstream code only
//! sees priced rows. Sector comes from the `quoteSummary` assetProfile
//! module; a missing profile is "Unknown", not an error.

use std::sync::Arc;

use serde::Deserialize;

use crate::adapters::symbol_seed;
use crate::market_data::Lookback;
use crate::{HttpClient, HttpRequest, MarketError, RawPricePoint, Symbol};

const BASE_URL: &str = "https://query1.finance.yahoo.com";

/// History and sector client for the Yahoo Finance chart API.
pub struct YahooChartClient {
    http: Arc<dyn HttpClient>,
    use_real_api: bool,
}

impl YahooChartClient {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        let use_real_api = !http.is_mock();
        Self { http, use_real_api }
    }

    /// Daily closing-price history over the lookback window, oldest first.
    ///
    /// # Errors
    ///
    /// [`MarketError::NoData`] when the window has no priced rows,
    /// [`MarketError::Upstream`] on transport failure or a malformed payload.
    pub async fn history(
        &self,
        symbol: &Symbol,
        lookback: Lookback,
    ) -> Result<Vec<RawPricePoint>, MarketError> {
        if self.use_real_api {
            self.fetch_real_history(symbol, lookback).await
        } else {
            Ok(fake_history(symbol, lookback))
        }
    }

    /// Company sector classification. Tickers without an asset profile
    /// (ETFs, indexes) report "Unknown".
    pub async fn sector(&self, symbol: &Symbol) -> Result<String, MarketError> {
        if self.use_real_api {
            self.fetch_real_sector(symbol).await
        } else {
            Ok(fake_sector(symbol))
        }
    }

    async fn fetch_real_history(
        &self,
        symbol: &Symbol,
        lookback: Lookback,
    ) -> Result<Vec<RawPricePoint>, MarketError> {
        let url = format!(
            "{}/v8/finance/chart/{}?range={}&interval=1d",
            BASE_URL,
            urlencoding::encode(symbol.as_str()),
            lookback.as_range(),
        );

        let response = self
            .http
            .execute(HttpRequest::get(url).with_header("accept", "application/json"))
            .await
            .map_err(|e| MarketError::Upstream(format!("yahoo chart request failed: {e}")))?;

        if !response.is_success() {
            return Err(MarketError::Upstream(format!(
                "yahoo chart returned status {}",
                response.status
            )));
        }

        parse_history(symbol, &response.body)
    }

    async fn fetch_real_sector(&self, symbol: &Symbol) -> Result<String, MarketError> {
        let url = format!(
            "{}/v10/finance/quoteSummary/{}?modules=assetProfile",
            BASE_URL,
            urlencoding::encode(symbol.as_str()),
        );

        let response = self
            .http
            .execute(HttpRequest::get(url).with_header("accept", "application/json"))
            .await
            .map_err(|e| MarketError::Upstream(format!("yahoo quoteSummary request failed: {e}")))?;

        if !response.is_success() {
            return Err(MarketError::Upstream(format!(
                "yahoo quoteSummary returned status {}",
                response.status
            )));
        }

        Ok(parse_sector(&response.body))
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

fn parse_history(symbol: &Symbol, body: &str) -> Result<Vec<RawPricePoint>, MarketError> {
    let payload: ChartResponse = serde_json::from_str(body)
        .map_err(|e| MarketError::Upstream(format!("malformed yahoo chart payload: {e}")))?;

    if let Some(error) = payload.chart.error {
        return Err(MarketError::Upstream(format!("yahoo chart error: {error}")));
    }

    let Some(result) = payload.chart.result.and_then(|mut r| {
        if r.is_empty() {
            None
        } else {
            Some(r.swap_remove(0))
        }
    }) else {
        return Err(MarketError::NoData {
            ticker: symbol.to_string(),
        });
    };

    let closes = result
        .indicators
        .quote
        .first()
        .map(|quote| quote.close.as_slice())
        .unwrap_or_default();

    let rows: Vec<RawPricePoint> = result
        .timestamp
        .iter()
        .zip(closes)
        .filter_map(|(&ts, &close)| close.map(|close| RawPricePoint::epoch(ts, close)))
        .collect();

    if rows.is_empty() {
        return Err(MarketError::NoData {
            ticker: symbol.to_string(),
        });
    }
    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryEnvelope,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryEnvelope {
    #[serde(default)]
    result: Option<Vec<QuoteSummaryResult>>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResult {
    #[serde(rename = "assetProfile", default)]
    asset_profile: Option<AssetProfile>,
}

#[derive(Debug, Deserialize)]
struct AssetProfile {
    #[serde(default)]
    sector: Option<String>,
}

fn parse_sector(body: &str) -> String {
    serde_json::from_str::<QuoteSummaryResponse>(body)
        .ok()
        .and_then(|payload| payload.quote_summary.result)
        .and_then(|mut result| {
            if result.is_empty() {
                None
            } else {
                result.swap_remove(0).asset_profile
            }
        })
        .and_then(|profile| profile.sector)
        .filter(|sector| !sector.trim().is_empty())
        .unwrap_or_else(|| String::from("Unknown"))
}

// Anchor fake series at a fixed recent epoch so tests are reproducible.
const FAKE_SERIES_END: i64 = 1_767_225_600; // 2026-01-01T00:00:00Z
const DAY_SECS: i64 = 86_400;

fn fake_history(symbol: &Symbol, lookback: Lookback) -> Vec<RawPricePoint> {
    let seed = symbol_seed(symbol);
    let rows = lookback.approx_rows();
    let base = 25.0 + (seed % 475) as f64;
    let drift = 0.05 + (seed % 40) as f64 / 100.0;

    (0..rows)
        .map(|i| {
            let ts = FAKE_SERIES_END - (rows - 1 - i) as i64 * DAY_SECS;
            let wiggle = (seed.wrapping_add(i as u64) % 7) as f64 / 10.0;
            RawPricePoint::epoch(ts, base + drift * i as f64 + wiggle)
        })
        .collect()
}

const FAKE_SECTORS: [&str; 5] = [
    "Technology",
    "Healthcare",
    "Financial Services",
    "Consumer Cyclical",
    "Energy",
];

fn fake_sector(symbol: &Symbol) -> String {
    let seed = symbol_seed(symbol);
    String::from(FAKE_SECTORS[(seed % FAKE_SECTORS.len() as u64) as usize])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoopHttpClient;

    fn symbol(raw: &str) -> Symbol {
        Symbol::parse(raw).expect("valid symbol")
    }

    #[test]
    fn parse_history_zips_timestamps_with_closes() {
        let body = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1755561600, 1755648000, 1755734400],
                    "indicators": {"quote": [{"close": [230.5, null, 232.25]}]}
                }],
                "error": null
            }
        }"#;

        let rows = parse_history(&symbol("AAPL"), body).expect("rows");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].close, 230.5);
        assert_eq!(rows[1].close, 232.25);
    }

    #[test]
    fn chart_error_and_empty_result_surface_as_errors() {
        let error_body = r#"{"chart": {"result": null, "error": {"code": "Not Found"}}}"#;
        let error = parse_history(&symbol("AAPL"), error_body).expect_err("must fail");
        assert!(matches!(error, MarketError::Upstream(_)));

        let empty_body = r#"{"chart": {"result": [], "error": null}}"#;
        let error = parse_history(&symbol("AAPL"), empty_body).expect_err("must fail");
        assert!(matches!(error, MarketError::NoData { .. }));
    }

    #[test]
    fn all_null_closes_is_no_data() {
        let body = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1755561600, 1755648000],
                    "indicators": {"quote": [{"close": [null, null]}]}
                }],
                "error": null
            }
        }"#;
        let error = parse_history(&symbol("AAPL"), body).expect_err("must fail");
        assert!(matches!(error, MarketError::NoData { .. }));
    }

    #[test]
    fn parse_sector_reads_the_asset_profile() {
        let body = r#"{
            "quoteSummary": {
                "result": [{"assetProfile": {"sector": "Technology", "country": "United States"}}],
                "error": null
            }
        }"#;
        assert_eq!(parse_sector(body), "Technology");
    }

    #[test]
    fn missing_profile_or_garbage_payload_is_unknown() {
        assert_eq!(
            parse_sector(r#"{"quoteSummary": {"result": [{}], "error": null}}"#),
            "Unknown"
        );
        assert_eq!(parse_sector("not json"), "Unknown");
    }

    #[tokio::test]
    async fn mock_transport_serves_an_ascending_fake_series() {
        let client = YahooChartClient::new(Arc::new(NoopHttpClient));
        let rows = client
            .history(&symbol("AAPL"), Lookback::SixMonths)
            .await
            .expect("rows");

        assert_eq!(rows.len(), Lookback::SixMonths.approx_rows());
        let mut last_close = 0.0;
        for row in &rows {
            assert!(row.close > 0.0);
            last_close = row.close;
        }
        assert!(last_close > rows[0].close);
    }

    #[tokio::test]
    async fn mock_transport_assigns_a_stable_sector() {
        let client = YahooChartClient::new(Arc::new(NoopHttpClient));
        let first = client.sector(&symbol("AAPL")).await.expect("sector");
        let second = client.sector(&symbol("AAPL")).await.expect("sector");
        assert_eq!(first, second);
        assert!(FAKE_SECTORS.contains(&first.as_str()));
    }
}
