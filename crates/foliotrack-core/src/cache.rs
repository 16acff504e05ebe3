//! Per-entry expiring cache for spot-price lookups.
//!
//! Replaces the coarse clear-everything-on-a-timer scheme: each entry carries
//! its own deadline, readers never observe a half-cleared map, and no
//! free-running background task is needed. Expired entries are invisible to
//! `get` and reaped opportunistically on writes.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::SpotQuote;

/// Default time-to-live, matching the 30-second refresh cadence the
/// frontend expects for spot prices.
pub const DEFAULT_QUOTE_TTL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
struct CacheEntry {
    quote: SpotQuote,
    expires_at: Instant,
}

#[derive(Debug)]
struct CacheInner {
    map: HashMap<String, CacheEntry>,
    ttl: Duration,
}

/// Thread-safe spot-quote cache keyed by ticker. Cloning shares storage.
#[derive(Debug, Clone)]
pub struct QuoteCache {
    inner: Arc<tokio::sync::RwLock<CacheInner>>,
}

impl QuoteCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(tokio::sync::RwLock::new(CacheInner {
                map: HashMap::new(),
                ttl,
            })),
        }
    }

    pub fn with_default_ttl() -> Self {
        Self::new(DEFAULT_QUOTE_TTL)
    }

    /// Fetch a cached quote if present and not expired.
    pub async fn get(&self, ticker: &str) -> Option<SpotQuote> {
        let inner = self.inner.read().await;
        inner.map.get(ticker).and_then(|entry| {
            if Instant::now() <= entry.expires_at {
                Some(entry.quote.clone())
            } else {
                None
            }
        })
    }

    /// Store a quote, stamping it with the cache TTL. Expired siblings are
    /// reaped on the same write lock.
    pub async fn put(&self, quote: SpotQuote) {
        let mut inner = self.inner.write().await;
        let now = Instant::now();
        inner.map.retain(|_, entry| entry.expires_at > now);
        let expires_at = now + inner.ttl;
        inner.map.insert(
            quote.ticker.to_string(),
            CacheEntry { quote, expires_at },
        );
    }

    /// Drop every entry. Atomic with respect to readers: they see either the
    /// full map or the empty one, never a partial clear.
    pub async fn clear(&self) {
        self.inner.write().await.map.clear();
    }

    /// Number of live (unexpired) entries.
    pub async fn len(&self) -> usize {
        let inner = self.inner.read().await;
        let now = Instant::now();
        inner
            .map
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Symbol;

    fn quote(ticker: &str, price: f64) -> SpotQuote {
        SpotQuote {
            ticker: Symbol::parse(ticker).expect("valid symbol"),
            price,
            date: String::from("2026-08-25"),
            change_percent: Some(0.42),
        }
    }

    #[tokio::test]
    async fn get_returns_live_entries() {
        let cache = QuoteCache::with_default_ttl();
        cache.put(quote("AAPL", 231.5)).await;

        let hit = cache.get("AAPL").await.expect("cache hit");
        assert_eq!(hit.price, 231.5);
        assert!(cache.get("MSFT").await.is_none());
    }

    #[tokio::test]
    async fn expired_entries_are_invisible() {
        let cache = QuoteCache::new(Duration::ZERO);
        cache.put(quote("AAPL", 231.5)).await;
        assert!(cache.get("AAPL").await.is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let cache = QuoteCache::with_default_ttl();
        let other = cache.clone();
        cache.put(quote("AAPL", 231.5)).await;

        assert!(other.get("AAPL").await.is_some());
        other.clear().await;
        assert!(cache.get("AAPL").await.is_none());
    }
}
