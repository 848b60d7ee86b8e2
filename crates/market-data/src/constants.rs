//! Engine-wide defaults and contract constants.

use std::time::Duration;

/// Time-to-live for cached quotes. Short, sized for freshness.
pub const PRICE_CACHE_TTL: Duration = Duration::from_secs(15);

/// Time-to-live for cached search results. Long, sized for stability.
pub const SEARCH_CACHE_TTL: Duration = Duration::from_secs(300);

/// Maximum entries per cache before batch eviction runs.
pub const MAX_CACHE_SIZE: usize = 500;

/// Per-request timeout for upstream calls.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Pause inserted after each upstream call inside a batch.
pub const BATCH_THROTTLE: Duration = Duration::from_millis(250);

/// Maximum number of codes processed per batch; excess input is dropped.
pub const MAX_BATCH_CODES: usize = 20;

/// Maximum number of search results returned to callers.
pub const MAX_SEARCH_RESULTS: usize = 10;

/// Width of a KRX issue code (e.g. "005930").
pub const CODE_LEN: usize = 6;
