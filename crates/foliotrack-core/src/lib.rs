//! # Foliotrack Core
//!
//! Market data, forecasting, and simulated-trading engine for the Foliotrack
//! portfolio backend.
//!
//! ## Overview
//!
//! This crate provides the domain layer the HTTP surface is built on:
//!
//! - **Canonical domain models** for symbols, price series, quotes, and lots
//! - **Provider adapters** for Twelve Data (spot) and Yahoo Finance (history, sector)
//! - **Series normalization** folding heterogeneous provider timestamps to UTC epoch seconds
//! - **Trend prediction** via ordinary least squares over daily closes
//! - **Simulated trading ledger** with weighted-average-cost lots
//! - **Expiring quote cache** with per-entry TTLs
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Twelve Data, Yahoo Finance) |
//! | [`cache`] | Expiring spot-quote cache |
//! | [`domain`] | Domain models (Symbol, PriceSeries, SpotQuote, Lot) |
//! | [`error`] | Core error types |
//! | [`forecast`] | Linear-regression price forecasting |
//! | [`http_client`] | HTTP client abstraction |
//! | [`insights`] | Portfolio value history and sector allocation |
//! | [`ledger`] | Simulated trading ledger |
//! | [`market_data`] | Market-data provider contract |
//! | [`series`] | Timestamp normalization for raw price rows |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use foliotrack_core::{
//!     forecast, series, Lookback, MarketData, MarketHub, NoopHttpClient, Symbol,
//!     TwelveDataClient, YahooChartClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let http = Arc::new(NoopHttpClient);
//!     let market = MarketHub::new(
//!         TwelveDataClient::new(http.clone(), "demo-key"),
//!         YahooChartClient::new(http),
//!     );
//!
//!     let symbol = Symbol::parse("AAPL")?;
//!     let rows = market.history(&symbol, Lookback::SixMonths).await?;
//!     let series = series::normalize(symbol, rows)?;
//!     let forecast = forecast::forecast(&series, 7)?;
//!
//!     for point in &forecast.predictions {
//!         println!("{}: ${:.2}", point.date, point.predicted_price);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Operations return `Result` with structured errors. Market-data failures
//! are per-ticker by design: one bad symbol in a batch never poisons the
//! rest.

pub mod adapters;
pub mod cache;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod http_client;
pub mod insights;
pub mod ledger;
pub mod market_data;
pub mod series;

// Re-export commonly used types at crate root for convenience

// Adapter implementations
pub use adapters::{MarketHub, TwelveDataClient, YahooChartClient};

// Caching
pub use cache::{QuoteCache, DEFAULT_QUOTE_TTL};

// Domain models
pub use domain::{
    round_price, Forecast, ForecastPoint, Lot, PriceSeries, RawInstant, RawPricePoint,
    SectorSlice, SeriesPoint, SpotQuote, Symbol, ValueSnapshot,
};

// Error types
pub use error::{MarketError, ValidationError};

// Forecasting
pub use forecast::{LinearModel, DEFAULT_HORIZON_DAYS, MIN_FIT_POINTS};

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};

// Simulated trading
pub use ledger::{LedgerError, SimLedger};

// Market-data contract
pub use market_data::{Lookback, MarketData};
