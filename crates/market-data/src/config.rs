//! Runtime configuration for the resolution engine.

use std::time::Duration;

use crate::constants::{
    BATCH_THROTTLE, MAX_CACHE_SIZE, PRICE_CACHE_TTL, REQUEST_TIMEOUT, SEARCH_CACHE_TTL,
};

/// Tunables for a [`KrxMarketService`](crate::service::KrxMarketService).
///
/// The quote and search caches are configured independently: quotes want
/// freshness, search results want stability.
#[derive(Clone, Debug)]
pub struct MarketConfig {
    /// Per-request timeout for upstream calls.
    pub request_timeout: Duration,
    /// TTL for the quote cache.
    pub price_cache_ttl: Duration,
    /// TTL for the search cache.
    pub search_cache_ttl: Duration,
    /// Entry bound for the quote cache.
    pub price_cache_size: usize,
    /// Entry bound for the search cache.
    pub search_cache_size: usize,
    /// Pause inserted after each upstream call inside a batch.
    pub batch_throttle: Duration,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            request_timeout: REQUEST_TIMEOUT,
            price_cache_ttl: PRICE_CACHE_TTL,
            search_cache_ttl: SEARCH_CACHE_TTL,
            price_cache_size: MAX_CACHE_SIZE,
            search_cache_size: MAX_CACHE_SIZE,
            batch_throttle: BATCH_THROTTLE,
        }
    }
}
