use thiserror::Error;

/// Validation errors raised while constructing domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },
}

/// Errors arising while fetching, normalizing, or forecasting market data.
///
/// Every variant is caught at the per-ticker boundary by callers: a failure
/// for one ticker becomes that ticker's error entry and never aborts the
/// processing of sibling tickers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MarketError {
    /// The upstream provider returned an empty or absent payload.
    #[error("no historical data available for {ticker}")]
    NoData { ticker: String },

    /// Fewer usable points than the operation needs.
    #[error("not enough data available for {ticker}: {points} points, need at least {min}")]
    InsufficientData {
        ticker: String,
        points: usize,
        min: usize,
    },

    /// A date or price field could not be parsed.
    #[error("failed to parse {field}: '{value}'")]
    Parse { field: &'static str, value: String },

    /// Transport or HTTP failure from the market-data provider. Surfaced
    /// immediately; there is no retry policy.
    #[error("upstream request failed: {0}")]
    Upstream(String),
}

impl From<ValidationError> for MarketError {
    fn from(error: ValidationError) -> Self {
        Self::Parse {
            field: "symbol",
            value: error.to_string(),
        }
    }
}
