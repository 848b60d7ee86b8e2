//! Sequential batch resolution with blunt inter-request throttling.

use std::time::Duration;

use log::debug;
use tokio::time::sleep;

use crate::constants::MAX_BATCH_CODES;
use crate::models::BatchOutcome;

use super::quote_resolver::QuoteResolver;

/// Resolves a bounded list of codes strictly in order.
///
/// Cache hits cost nothing; every code that needed an upstream attempt is
/// followed by a fixed pause so consecutive misses do not hammer the
/// upstream's abuse detection. Batch latency therefore scales with the miss
/// count, which is the accepted trade-off.
pub struct BatchCoordinator {
    throttle: Duration,
}

impl BatchCoordinator {
    pub fn new(throttle: Duration) -> Self {
        Self { throttle }
    }

    /// Resolve up to [`MAX_BATCH_CODES`] codes; excess input is silently
    /// dropped. Each outcome is independent; a failed code never aborts the
    /// rest of the batch.
    pub async fn resolve_batch(
        &self,
        resolver: &QuoteResolver,
        codes: &[String],
    ) -> Vec<BatchOutcome> {
        let codes = &codes[..codes.len().min(MAX_BATCH_CODES)];
        let mut outcomes = Vec::with_capacity(codes.len());

        for (index, raw) in codes.iter().enumerate() {
            let code = match QuoteResolver::normalize_code(raw) {
                Ok(code) => code,
                Err(_) => {
                    // rejected before any upstream contact: no pause needed
                    outcomes.push(BatchOutcome::not_found(raw.trim()));
                    continue;
                }
            };

            if let Some(quote) = resolver.cached(&code) {
                outcomes.push(BatchOutcome::found(quote));
                continue;
            }

            match resolver.resolve(&code).await {
                Ok(quote) => outcomes.push(BatchOutcome::found(quote)),
                Err(e) => {
                    debug!("batch: {} unresolved: {}", code, e);
                    outcomes.push(BatchOutcome::not_found(code));
                }
            }

            if index + 1 < codes.len() {
                sleep(self.throttle).await;
            }
        }

        outcomes
    }
}
