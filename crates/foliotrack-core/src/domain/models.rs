use serde::{Deserialize, Serialize};

use crate::Symbol;

/// Raw instant as delivered by an upstream provider.
///
/// Providers disagree on representation: the chart API hands back whole epoch
/// seconds, while the time-series API returns textual instants that may carry
/// a zone offset, be naive date-times, or be bare calendar dates. The
/// normalizer is the only place that interprets this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInstant {
    Epoch(i64),
    Text(String),
}

/// One raw historical closing-price row for a ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPricePoint {
    pub ts: RawInstant,
    pub close: f64,
}

impl RawPricePoint {
    pub fn epoch(secs: i64, close: f64) -> Self {
        Self {
            ts: RawInstant::Epoch(secs),
            close,
        }
    }

    pub fn text(ts: impl Into<String>, close: f64) -> Self {
        Self {
            ts: RawInstant::Text(ts.into()),
            close,
        }
    }
}

/// One normalized point: naive UTC epoch seconds paired with a closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub epoch_secs: i64,
    pub close: f64,
}

/// Normalized, model-ready price series for one ticker.
///
/// Invariants: epoch seconds are timezone-naive UTC, ascending as delivered
/// by the source, not deduplicated. Created fresh per request and discarded
/// after use; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: Symbol,
    pub points: Vec<SeriesPoint>,
}

impl PriceSeries {
    pub fn new(symbol: Symbol, points: Vec<SeriesPoint>) -> Self {
        Self { symbol, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One projected price for a future calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Calendar date formatted `YYYY-MM-DD`.
    pub date: String,
    /// Predicted closing price, rounded to 2 decimals.
    pub predicted_price: f64,
}

/// Successful forecast for one ticker: one point per horizon day, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub ticker: Symbol,
    pub predictions: Vec<ForecastPoint>,
}

/// Latest spot price with percent change versus the previous close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotQuote {
    pub ticker: Symbol,
    pub price: f64,
    pub date: String,
    pub change_percent: Option<f64>,
}

/// Simulated holding: quantity of one symbol at a weighted-average cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub symbol: Symbol,
    pub quantity: u32,
    pub average_price: f64,
}

/// Total portfolio value on one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSnapshot {
    pub date: String,
    pub value: f64,
}

/// Aggregate held quantity for one sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorSlice {
    pub sector: String,
    pub value: u64,
}

/// Round a price to 2 decimal places for presentation.
pub fn round_price(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
