//! Market-data client contract.
//!
//! The trait is object-safe (boxed futures) so the web layer can hold a
//! `dyn MarketData` and tests can substitute scripted implementations.
//! Each method maps to one upstream concern:
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`spot`](MarketData::spot) | Latest price with percent change |
//! | [`history`](MarketData::history) | Raw daily closing-price history |
//! | [`sector`](MarketData::sector) | Company sector classification |

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{MarketError, RawPricePoint, SpotQuote, Symbol};

/// Lookback window for historical requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookback {
    /// One trading week; used by the portfolio value history.
    SevenDays,
    /// Six months of daily closes; feeds the trend predictor.
    SixMonths,
}

impl Lookback {
    pub const fn as_range(self) -> &'static str {
        match self {
            Self::SevenDays => "7d",
            Self::SixMonths => "6mo",
        }
    }

    /// Approximate number of daily rows the window yields.
    pub const fn approx_rows(self) -> usize {
        match self {
            Self::SevenDays => 7,
            Self::SixMonths => 126,
        }
    }
}

impl Display for Lookback {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_range())
    }
}

/// Market-data provider contract.
///
/// Implementations must be `Send + Sync`; the web layer shares one instance
/// across all request handlers. Failures are per-call and carry no retry
/// semantics.
pub trait MarketData: Send + Sync {
    /// Latest spot price for a ticker.
    ///
    /// # Errors
    ///
    /// [`MarketError::NoData`] when the provider returns an empty payload,
    /// [`MarketError::Upstream`] on transport failure.
    fn spot<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<SpotQuote, MarketError>> + Send + 'a>>;

    /// Raw daily closing-price history over the lookback window.
    ///
    /// An empty upstream payload is [`MarketError::NoData`]; rows are
    /// delivered in the provider's (ascending) order and are not cleaned
    /// here; that is the normalizer's job.
    fn history<'a>(
        &'a self,
        symbol: &'a Symbol,
        lookback: Lookback,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawPricePoint>, MarketError>> + Send + 'a>>;

    /// Company sector for a ticker. Callers fold failures into "Unknown".
    fn sector<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<String, MarketError>> + Send + 'a>>;
}
