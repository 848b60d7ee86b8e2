//! Canonical shapes produced by the resolution engine.

mod batch;
mod quote;
mod search;

pub use batch::BatchOutcome;
pub use quote::Quote;
pub use search::SearchResult;
