//! Ordered provider fallback for name/code search.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use crate::cache::TtlCache;
use crate::constants::{CODE_LEN, MAX_SEARCH_RESULTS};
use crate::errors::FailureClass;
use crate::models::SearchResult;
use crate::provider::traits::SearchSource;

use super::quote_resolver::QuoteResolver;
use super::symbols::builtin_matches;

/// Resolves free-text queries through the search source chain, falling back
/// to a direct quote probe for code-shaped queries and finally to the
/// bundled symbol table.
pub struct SearchResolver {
    sources: Vec<Arc<dyn SearchSource>>,
    cache: TtlCache<Vec<SearchResult>>,
    quotes: Arc<QuoteResolver>,
}

impl SearchResolver {
    /// Create a resolver over `sources`, most schema-stable first.
    pub fn new(
        sources: Vec<Arc<dyn SearchSource>>,
        ttl: Duration,
        cache_size: usize,
        quotes: Arc<QuoteResolver>,
    ) -> Self {
        Self {
            sources,
            cache: TtlCache::new(ttl, cache_size),
            quotes,
        }
    }

    /// Search for issues matching `query`.
    ///
    /// Always returns at most ten results; an empty or whitespace query
    /// yields an empty list without contacting upstream. The final (capped)
    /// list is cached, empty outcomes included.
    pub async fn search(&self, query: &str) -> Vec<SearchResult> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        if let Some(results) = self.cache.get(query) {
            debug!("search cache hit for {:?}", query);
            return results;
        }

        let results = self.search_upstream(query).await;
        self.cache.put(query, results.clone());
        results
    }

    async fn search_upstream(&self, query: &str) -> Vec<SearchResult> {
        for source in &self.sources {
            match source.search(query).await {
                Ok(results) if !results.is_empty() => {
                    debug!("search hit via {} for {:?}", source.id(), query);
                    return cap(results);
                }
                Ok(_) => {
                    debug!("{}: empty search result for {:?}", source.id(), query);
                }
                Err(e) => match e.failure_class() {
                    FailureClass::Transport => {
                        warn!("{}: transport failure for {:?}: {}", source.id(), query, e);
                    }
                    _ => {
                        debug!("{}: {} for {:?}", source.id(), e, query);
                    }
                },
            }
        }

        // A bare issue code never matches a name search; probe it directly.
        if looks_like_code(query) {
            if let Ok(quote) = self.quotes.resolve(query).await {
                debug!("search resolved {:?} via direct quote probe", query);
                return vec![SearchResult::new(quote.name, query)];
            }
        }

        builtin_matches(query)
    }
}

fn cap(mut results: Vec<SearchResult>) -> Vec<SearchResult> {
    results.truncate(MAX_SEARCH_RESULTS);
    results
}

/// True when the query has the exact shape of an issue code.
fn looks_like_code(query: &str) -> bool {
    query.len() == CODE_LEN && query.chars().all(|c| c.is_ascii_alphanumeric())
}
