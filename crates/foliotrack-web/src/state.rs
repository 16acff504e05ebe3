//! Shared application state.

use std::sync::Arc;

use foliotrack_core::{MarketData, QuoteCache, SimLedger};
use foliotrack_store::PortfolioStore;

/// State shared by every request handler. Cloning is cheap; all members are
/// handles over shared storage.
#[derive(Clone)]
pub struct AppState {
    pub market: Arc<dyn MarketData>,
    pub store: PortfolioStore,
    pub ledger: SimLedger,
    pub quotes: QuoteCache,
}

impl AppState {
    pub fn new(
        market: Arc<dyn MarketData>,
        store: PortfolioStore,
        ledger: SimLedger,
        quotes: QuoteCache,
    ) -> Self {
        Self {
            market,
            store,
            ledger,
            quotes,
        }
    }
}
