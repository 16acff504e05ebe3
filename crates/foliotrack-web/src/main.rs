use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use foliotrack_core::{
    MarketHub, QuoteCache, ReqwestHttpClient, SimLedger, TwelveDataClient, YahooChartClient,
};
use foliotrack_store::{PortfolioStore, StoreConfig};
use foliotrack_web::{router, AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;
    info!(bind_addr = %config.bind_addr, db_path = %config.db_path.display(), "starting foliotrack");

    let store = PortfolioStore::open(StoreConfig::new(config.db_path.clone()))?;

    let http_client = reqwest::Client::builder()
        .user_agent("foliotrack/0.1.0")
        .timeout(config.http_timeout)
        .build()?;
    let http = Arc::new(ReqwestHttpClient::with_client(http_client));

    let market = MarketHub::new(
        TwelveDataClient::new(http.clone(), config.twelvedata_api_key.clone()),
        YahooChartClient::new(http),
    );

    let state = AppState::new(
        Arc::new(market),
        store,
        SimLedger::new(),
        QuoteCache::new(config.quote_ttl),
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(state)).await?;

    Ok(())
}
