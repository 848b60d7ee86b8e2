//! Ordered provider fallback for quote resolution.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use crate::cache::TtlCache;
use crate::errors::{FailureClass, KrxMarketError};
use crate::models::Quote;
use crate::provider::traits::QuoteSource;

/// Resolves quotes through a fixed-priority source chain with a TTL cache
/// in front.
///
/// Sources are attempted in registration order, exactly once each per
/// resolution; the first usable quote wins and is written back to the cache.
pub struct QuoteResolver {
    sources: Vec<Arc<dyn QuoteSource>>,
    cache: TtlCache<Quote>,
}

impl QuoteResolver {
    /// Create a resolver over `sources`, most accurate first.
    pub fn new(sources: Vec<Arc<dyn QuoteSource>>, ttl: Duration, cache_size: usize) -> Self {
        Self {
            sources,
            cache: TtlCache::new(ttl, cache_size),
        }
    }

    /// Trim and uppercase a caller-supplied code, rejecting anything that
    /// could not be an issue code before any upstream contact.
    pub(crate) fn normalize_code(code: &str) -> Result<String, KrxMarketError> {
        let code = code.trim().to_ascii_uppercase();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(KrxMarketError::InvalidCode(code));
        }
        Ok(code)
    }

    /// Fresh cached quote for `code`, if any. Never contacts upstream.
    pub fn cached(&self, code: &str) -> Option<Quote> {
        let code = Self::normalize_code(code).ok()?;
        self.cache.get(&code)
    }

    /// Resolve a quote, consulting the cache and then each source in order.
    ///
    /// Returns [`KrxMarketError::AllProvidersExhausted`] when no source
    /// produced a usable quote; callers surface that as "not found".
    pub async fn resolve(&self, code: &str) -> Result<Quote, KrxMarketError> {
        let code = Self::normalize_code(code)?;

        if let Some(quote) = self.cache.get(&code) {
            debug!("quote cache hit for {}", code);
            return Ok(quote);
        }

        for source in &self.sources {
            match source.fetch_quote(&code).await {
                Ok(quote) => {
                    debug!("resolved {} via {}", code, source.id());
                    self.cache.put(code, quote.clone());
                    return Ok(quote);
                }
                Err(e) => match e.failure_class() {
                    FailureClass::Transport => {
                        warn!("{}: transport failure for {}: {}", source.id(), code, e);
                    }
                    FailureClass::Schema => {
                        debug!("{}: unusable payload for {}: {}", source.id(), code, e);
                    }
                    FailureClass::NoData => {
                        debug!("{}: no data for {}", source.id(), code);
                    }
                    FailureClass::Terminal => return Err(e),
                },
            }
        }

        Err(KrxMarketError::AllProvidersExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockQuoteSource {
        id: &'static str,
        calls: AtomicUsize,
        fail: bool,
    }

    impl MockQuoteSource {
        fn new(id: &'static str, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                id,
                calls: AtomicUsize::new(0),
                fail,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl QuoteSource for MockQuoteSource {
        fn id(&self) -> &'static str {
            self.id
        }

        async fn fetch_quote(&self, code: &str) -> Result<Quote, KrxMarketError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if self.fail {
                Err(KrxMarketError::NoData { provider: self.id })
            } else {
                Ok(Quote {
                    code: code.to_string(),
                    name: format!("{} via {}", code, self.id),
                    price: 71_000,
                    change: 500,
                    change_rate: 0.71,
                })
            }
        }
    }

    fn resolver(sources: Vec<Arc<dyn QuoteSource>>, ttl: Duration) -> QuoteResolver {
        QuoteResolver::new(sources, ttl, 500)
    }

    #[tokio::test]
    async fn test_fallback_stops_at_first_success() {
        let a = MockQuoteSource::new("A", true);
        let b = MockQuoteSource::new("B", false);
        let c = MockQuoteSource::new("C", false);
        let resolver = resolver(
            vec![a.clone(), b.clone(), c.clone()],
            Duration::from_secs(15),
        );

        let quote = resolver.resolve("005930").await.unwrap();

        assert_eq!(quote.name, "005930 via B");
        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 1);
        // the chain short-circuits; C is never contacted
        assert_eq!(c.calls(), 0);
    }

    #[tokio::test]
    async fn test_cache_idempotence_within_ttl() {
        let a = MockQuoteSource::new("A", false);
        let resolver = resolver(vec![a.clone()], Duration::from_secs(15));

        let first = resolver.resolve("005930").await.unwrap();
        let second = resolver.resolve("005930").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(a.calls(), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_triggers_fresh_attempt() {
        let a = MockQuoteSource::new("A", false);
        // zero TTL: every stored entry is stale by the next lookup
        let resolver = resolver(vec![a.clone()], Duration::ZERO);

        resolver.resolve("005930").await.unwrap();
        resolver.resolve("005930").await.unwrap();

        assert_eq!(a.calls(), 2);
    }

    #[tokio::test]
    async fn test_code_is_normalized_before_lookup() {
        let a = MockQuoteSource::new("A", false);
        let resolver = resolver(vec![a.clone()], Duration::from_secs(15));

        resolver.resolve(" 005930 ").await.unwrap();
        let quote = resolver.resolve("005930").await.unwrap();

        assert_eq!(quote.code, "005930");
        assert_eq!(a.calls(), 1);
    }

    #[tokio::test]
    async fn test_invalid_code_never_contacts_upstream() {
        let a = MockQuoteSource::new("A", false);
        let resolver = resolver(vec![a.clone()], Duration::from_secs(15));

        let err = resolver.resolve("   ").await.unwrap_err();
        assert!(matches!(err, KrxMarketError::InvalidCode(_)));

        let err = resolver.resolve("0059-30").await.unwrap_err();
        assert!(matches!(err, KrxMarketError::InvalidCode(_)));

        assert_eq!(a.calls(), 0);
    }

    #[tokio::test]
    async fn test_all_sources_failing_is_exhausted() {
        let a = MockQuoteSource::new("A", true);
        let b = MockQuoteSource::new("B", true);
        let resolver = resolver(vec![a.clone(), b.clone()], Duration::from_secs(15));

        let err = resolver.resolve("005930").await.unwrap_err();

        assert!(matches!(err, KrxMarketError::AllProvidersExhausted));
        assert!(err.is_not_found());
        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 1);
    }

    #[tokio::test]
    async fn test_cached_never_contacts_upstream() {
        let a = MockQuoteSource::new("A", false);
        let resolver = resolver(vec![a.clone()], Duration::from_secs(15));

        assert!(resolver.cached("005930").is_none());
        resolver.resolve("005930").await.unwrap();
        assert!(resolver.cached("005930").is_some());
        assert_eq!(a.calls(), 1);
    }
}
