//! Process-wide TTL caches shared by the resolvers.

mod ttl_cache;

pub use ttl_cache::TtlCache;
