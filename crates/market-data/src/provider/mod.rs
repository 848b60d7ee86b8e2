//! Upstream providers and their payload normalizers.
//!
//! Each provider owns exactly one endpoint and one normalizer. Normalizers
//! are pure functions from a raw payload to the canonical shape; they never
//! panic on malformed input and report unusable payloads through
//! [`KrxMarketError`](crate::errors::KrxMarketError) so the resolvers can
//! advance along the fallback chain.

pub mod headers;
pub mod lenient;
pub mod naver_ac;
pub mod naver_basic;
pub mod naver_polling;
pub mod naver_search;
pub mod parse;
pub mod sign;
pub mod traits;

pub use naver_ac::NaverAcProvider;
pub use naver_basic::NaverBasicProvider;
pub use naver_polling::NaverPollingProvider;
pub use naver_search::NaverSearchProvider;
pub use traits::{QuoteSource, SearchSource};
