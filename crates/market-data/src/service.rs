//! Facade tying the resolvers, caches and default providers together.

use std::sync::Arc;

use crate::config::MarketConfig;
use crate::errors::KrxMarketError;
use crate::models::{BatchOutcome, Quote, SearchResult};
use crate::provider::{
    NaverAcProvider, NaverBasicProvider, NaverPollingProvider, NaverSearchProvider, QuoteSource,
    SearchSource,
};
use crate::resolver::{BatchCoordinator, QuoteResolver, SearchResolver};

/// Unified entry point for the serving layer.
///
/// One instance is meant to be shared process-wide behind an `Arc`; all
/// internal state is mutex-guarded and every method takes `&self`.
pub struct KrxMarketService {
    quotes: Arc<QuoteResolver>,
    search: SearchResolver,
    batch: BatchCoordinator,
}

impl KrxMarketService {
    /// Create a service with default configuration and the standard
    /// provider chains.
    pub fn new() -> Self {
        Self::with_config(MarketConfig::default())
    }

    /// Create a service with custom configuration and the standard
    /// provider chains.
    pub fn with_config(config: MarketConfig) -> Self {
        let quote_sources: Vec<Arc<dyn QuoteSource>> = vec![
            Arc::new(NaverBasicProvider::primary(config.request_timeout)),
            Arc::new(NaverBasicProvider::fallback(config.request_timeout)),
            Arc::new(NaverPollingProvider::new(config.request_timeout)),
        ];
        let search_sources: Vec<Arc<dyn SearchSource>> = vec![
            Arc::new(NaverAcProvider::new(config.request_timeout)),
            Arc::new(NaverSearchProvider::new(config.request_timeout)),
        ];
        Self::assemble(config, quote_sources, search_sources)
    }

    /// Wire a service from explicit source chains. Used by tests and by
    /// callers embedding their own providers.
    pub fn assemble(
        config: MarketConfig,
        quote_sources: Vec<Arc<dyn QuoteSource>>,
        search_sources: Vec<Arc<dyn SearchSource>>,
    ) -> Self {
        let quotes = Arc::new(QuoteResolver::new(
            quote_sources,
            config.price_cache_ttl,
            config.price_cache_size,
        ));
        let search = SearchResolver::new(
            search_sources,
            config.search_cache_ttl,
            config.search_cache_size,
            Arc::clone(&quotes),
        );
        let batch = BatchCoordinator::new(config.batch_throttle);

        Self {
            quotes,
            search,
            batch,
        }
    }

    /// Latest quote for an issue code.
    ///
    /// [`KrxMarketError::AllProvidersExhausted`] and
    /// [`KrxMarketError::InvalidCode`] both read as "not found"; see
    /// [`KrxMarketError::is_not_found`].
    pub async fn get_quote(&self, code: &str) -> Result<Quote, KrxMarketError> {
        self.quotes.resolve(code).await
    }

    /// Name/code search, capped at ten results.
    pub async fn search(&self, query: &str) -> Vec<SearchResult> {
        self.search.search(query).await
    }

    /// Sequentially resolve up to twenty codes, throttling between upstream
    /// calls.
    pub async fn get_quotes_batch(&self, codes: &[String]) -> Vec<BatchOutcome> {
        self.batch.resolve_batch(&self.quotes, codes).await
    }
}

impl Default for KrxMarketService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;

    struct StaticQuoteSource;

    #[async_trait]
    impl QuoteSource for StaticQuoteSource {
        fn id(&self) -> &'static str {
            "STATIC"
        }

        async fn fetch_quote(&self, code: &str) -> Result<Quote, KrxMarketError> {
            Ok(Quote {
                code: code.to_string(),
                name: "Samsung Electronics".to_string(),
                price: 71_000,
                change: 500,
                change_rate: 0.71,
            })
        }
    }

    struct EmptySearchSource;

    #[async_trait]
    impl SearchSource for EmptySearchSource {
        fn id(&self) -> &'static str {
            "EMPTY"
        }

        async fn search(&self, _query: &str) -> Result<Vec<SearchResult>, KrxMarketError> {
            Ok(Vec::new())
        }
    }

    fn service() -> KrxMarketService {
        let config = MarketConfig {
            batch_throttle: Duration::from_millis(1),
            ..MarketConfig::default()
        };
        KrxMarketService::assemble(
            config,
            vec![Arc::new(StaticQuoteSource)],
            vec![Arc::new(EmptySearchSource)],
        )
    }

    #[tokio::test]
    async fn test_quote_search_and_batch_share_one_cache() {
        let service = service();

        let quote = service.get_quote("005930").await.unwrap();
        assert_eq!(quote.price, 71_000);

        // code-shaped query with no search hits synthesizes from the quote
        let results = service.search("005930").await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Samsung Electronics");
        assert_eq!(results[0].code, "005930");

        let outcomes = service
            .get_quotes_batch(&["005930".to_string(), "bogus!".to_string()])
            .await;
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].is_found());
        assert!(!outcomes[1].is_found());
    }

    #[tokio::test]
    async fn test_invalid_code_is_not_found() {
        let service = service();
        let err = service.get_quote("  ").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
