//! Provider adapters.
//!
//! Two upstream providers cover the three market-data concerns: Twelve Data
//! serves spot quotes, the Yahoo chart API serves daily history and sector
//! classification. [`MarketHub`] stitches them into one [`MarketData`]
//! implementation for the web layer.
//!
//! Each adapter calls the real API through an injected [`crate::HttpClient`]
//! and switches to deterministic fake data when the transport is a mock, so
//! the full stack is testable offline.

mod twelvedata;
mod yahoo;

use std::future::Future;
use std::pin::Pin;

pub use twelvedata::TwelveDataClient;
pub use yahoo::YahooChartClient;

use crate::market_data::{Lookback, MarketData};
use crate::{MarketError, RawPricePoint, SpotQuote, Symbol};

/// Deterministic per-symbol seed for fake-data modes.
pub(crate) fn symbol_seed(symbol: &Symbol) -> u64 {
    symbol.as_str().bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(u64::from(byte))
    })
}

/// Routes each market-data concern to the provider that serves it.
pub struct MarketHub {
    spot: TwelveDataClient,
    chart: YahooChartClient,
}

impl MarketHub {
    pub fn new(spot: TwelveDataClient, chart: YahooChartClient) -> Self {
        Self { spot, chart }
    }
}

impl MarketData for MarketHub {
    fn spot<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<SpotQuote, MarketError>> + Send + 'a>> {
        Box::pin(self.spot.spot(symbol))
    }

    fn history<'a>(
        &'a self,
        symbol: &'a Symbol,
        lookback: Lookback,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawPricePoint>, MarketError>> + Send + 'a>> {
        Box::pin(self.chart.history(symbol, lookback))
    }

    fn sector<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<String, MarketError>> + Send + 'a>> {
        Box::pin(self.chart.sector(symbol))
    }
}
