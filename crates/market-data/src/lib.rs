//! KRX Market Data Crate
//!
//! Quote and search resolution engine for Korean (KRX) securities backed by
//! Naver Finance. The upstream exposes no single stable contract: several
//! undocumented endpoints return different, partially overlapping,
//! inconsistently-signed JSON/text schemas, and occasionally fail or
//! rate-limit. This crate reconciles them behind one canonical surface.
//!
//! # Overview
//!
//! The crate provides:
//! - Ordered multi-provider fallback for quotes and search
//! - Per-provider payload normalization, including sign-of-change correction
//! - Bounded TTL caches that shield the upstream from redundant traffic
//! - Sequential, throttled batch resolution
//!
//! # Architecture
//!
//! ```text
//! +-------------------+      +-------------------+
//! |   Serving layer   | -->  | KrxMarketService  |  (facade)
//! +-------------------+      +-------------------+
//!                                      |
//!                      +---------------+---------------+
//!                      v                               v
//!              +---------------+              +----------------+
//!              | QuoteResolver |<-------------| SearchResolver |
//!              +---------------+  code probe  +----------------+
//!                      |                               |
//!                      v                               v
//!              +---------------+              +----------------+
//!              |  QuoteSource  |              |  SearchSource  |  (providers)
//!              +---------------+              +----------------+
//!                      |                               |
//!                      v                               v
//!              +---------------+              +----------------+
//!              |     Quote     |              |  SearchResult  |  (canonical)
//!              +---------------+              +----------------+
//! ```
//!
//! # Core Types
//!
//! - [`Quote`] - Canonical quote with sign-consistent change fields
//! - [`SearchResult`] - Name/code pair from a search resolution
//! - [`BatchOutcome`] - Per-code outcome of a batch resolution
//! - [`KrxMarketService`] - Facade owning resolvers, caches and providers
//! - [`KrxMarketError`] - Error enum classified per failure class

pub mod cache;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod provider;
pub mod resolver;
pub mod service;

// Re-export the public surface consumed by the serving layer
pub use config::MarketConfig;
pub use errors::{FailureClass, KrxMarketError};
pub use models::{BatchOutcome, Quote, SearchResult};
pub use provider::{
    NaverAcProvider, NaverBasicProvider, NaverPollingProvider, NaverSearchProvider, QuoteSource,
    SearchSource,
};
pub use resolver::{BatchCoordinator, QuoteResolver, SearchResolver};
pub use service::KrxMarketService;
