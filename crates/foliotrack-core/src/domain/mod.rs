//! Canonical domain types for foliotrack.
//!
//! All types here are plain data with validation at construction time where
//! an invariant exists, and full serde support for the JSON boundary.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated, uppercase ticker |
//! | [`RawPricePoint`] | Provider row before normalization |
//! | [`PriceSeries`] | Normalized epoch-seconds/close series |
//! | [`Forecast`] | Per-ticker forecast output |
//! | [`SpotQuote`] | Latest price with percent change |
//! | [`Lot`] | Simulated holding at average cost |

mod models;
mod symbol;

pub use models::{
    round_price, Forecast, ForecastPoint, Lot, PriceSeries, RawInstant, RawPricePoint,
    SectorSlice, SeriesPoint, SpotQuote, ValueSnapshot,
};
pub use symbol::Symbol;
