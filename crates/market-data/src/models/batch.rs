//! Per-code outcome of a batch resolution.

use serde::{Deserialize, Serialize};

use super::quote::Quote;

/// Outcome for one code in a batch request.
///
/// A missing `quote` means the code did not resolve; one code's failure never
/// aborts the batch it belongs to.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// The code this outcome belongs to
    pub code: String,

    /// The resolved quote, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<Quote>,
}

impl BatchOutcome {
    /// Outcome for a successfully resolved code.
    pub fn found(quote: Quote) -> Self {
        Self {
            code: quote.code.clone(),
            quote: Some(quote),
        }
    }

    /// Outcome for a code that did not resolve.
    pub fn not_found(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            quote: None,
        }
    }

    /// Whether this code resolved to a quote.
    pub fn is_found(&self) -> bool {
        self.quote.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_serializes_without_quote() {
        let value = serde_json::to_value(BatchOutcome::not_found("005930")).unwrap();
        assert_eq!(value["code"], "005930");
        assert!(value.get("quote").is_none());
    }

    #[test]
    fn test_found_carries_the_quote_code() {
        let outcome = BatchOutcome::found(Quote {
            code: "000660".to_string(),
            name: "SK하이닉스".to_string(),
            price: 178_000,
            change: -1_500,
            change_rate: -0.84,
        });
        assert_eq!(outcome.code, "000660");
        assert!(outcome.is_found());
    }
}
