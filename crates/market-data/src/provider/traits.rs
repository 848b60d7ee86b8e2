//! Seams between the resolvers and concrete upstream providers.

use async_trait::async_trait;

use crate::errors::KrxMarketError;
use crate::models::{Quote, SearchResult};

/// A single upstream source of quotes.
///
/// Implementations perform one network call and hand the payload to their
/// normalizer; they never retry internally. The resolver attempts each source
/// exactly once per resolution, in registration order.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Stable identifier used in logs (e.g. "NAVER_M").
    fn id(&self) -> &'static str;

    /// Fetch and normalize the latest quote for an uppercased issue code.
    async fn fetch_quote(&self, code: &str) -> Result<Quote, KrxMarketError>;
}

/// A single upstream source of search results.
#[async_trait]
pub trait SearchSource: Send + Sync {
    /// Stable identifier used in logs (e.g. "NAVER_AC").
    fn id(&self) -> &'static str;

    /// Fetch and normalize results for a free-text query.
    ///
    /// An empty vector means the provider answered and found no matches,
    /// which is distinct from a transport or parse failure.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, KrxMarketError>;
}
