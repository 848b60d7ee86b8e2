//! Error types and failure classification for the market data crate.
//!
//! This module provides:
//! - [`KrxMarketError`]: The main error enum for all resolution operations
//! - [`FailureClass`]: Classification that drives provider fallback and logging

use thiserror::Error;

/// How the resolver should react to a provider failure.
///
/// Transport and schema failures both advance to the next provider, but they
/// are logged differently: a transport failure is an upstream availability
/// signal, a schema failure means the payload shape drifted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureClass {
    /// Network-level failure talking to one provider (timeout, non-2xx).
    Transport,
    /// Provider responded but the expected fields were absent or unparsable.
    Schema,
    /// Provider answered cleanly and had nothing for this code/query.
    NoData,
    /// Terminal for this resolution; no further providers are tried.
    Terminal,
}

/// Errors that can occur while resolving quotes or search results.
#[derive(Error, Debug)]
pub enum KrxMarketError {
    /// A network error occurred while communicating with a provider.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A provider answered with a non-success HTTP status.
    #[error("unexpected status from {provider}: {status}")]
    Status {
        /// The provider that returned the status
        provider: &'static str,
        /// The HTTP status code
        status: u16,
    },

    /// A provider payload could not be parsed into the expected shape.
    #[error("parse error from {provider}: {message}")]
    Parse {
        /// The provider whose payload was unusable
        provider: &'static str,
        /// What failed to parse
        message: String,
    },

    /// A provider answered cleanly but had no usable data.
    #[error("no data from {provider}")]
    NoData {
        /// The provider that had nothing
        provider: &'static str,
    },

    /// The caller-supplied code was rejected before any upstream contact.
    #[error("invalid code: {0:?}")]
    InvalidCode(String),

    /// Every provider in the chain was tried and none produced a result.
    /// Surfaced to callers as "not found", not as a system error.
    #[error("all providers exhausted")]
    AllProvidersExhausted,
}

impl KrxMarketError {
    /// Returns the failure classification for this error.
    ///
    /// The resolver advances to the next provider on [`FailureClass::Transport`],
    /// [`FailureClass::Schema`] and [`FailureClass::NoData`]; it stops on
    /// [`FailureClass::Terminal`].
    pub fn failure_class(&self) -> FailureClass {
        match self {
            Self::Network(_) | Self::Status { .. } => FailureClass::Transport,
            Self::Parse { .. } => FailureClass::Schema,
            Self::NoData { .. } => FailureClass::NoData,
            Self::InvalidCode(_) | Self::AllProvidersExhausted => FailureClass::Terminal,
        }
    }

    /// True when the error means "not found" rather than an engine defect.
    /// Callers should not retry these at the engine level.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AllProvidersExhausted | Self::InvalidCode(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_transport() {
        let error = KrxMarketError::Status {
            provider: "NAVER_M",
            status: 503,
        };
        assert_eq!(error.failure_class(), FailureClass::Transport);
    }

    #[test]
    fn test_parse_is_schema() {
        let error = KrxMarketError::Parse {
            provider: "NAVER_M",
            message: "missing price".to_string(),
        };
        assert_eq!(error.failure_class(), FailureClass::Schema);
    }

    #[test]
    fn test_no_data_advances() {
        let error = KrxMarketError::NoData {
            provider: "NAVER_POLLING",
        };
        assert_eq!(error.failure_class(), FailureClass::NoData);
    }

    #[test]
    fn test_invalid_code_is_terminal() {
        let error = KrxMarketError::InvalidCode("".to_string());
        assert_eq!(error.failure_class(), FailureClass::Terminal);
        assert!(error.is_not_found());
    }

    #[test]
    fn test_exhausted_is_terminal_not_found() {
        let error = KrxMarketError::AllProvidersExhausted;
        assert_eq!(error.failure_class(), FailureClass::Terminal);
        assert!(error.is_not_found());
    }

    #[test]
    fn test_error_display() {
        let error = KrxMarketError::Status {
            provider: "NAVER_API",
            status: 429,
        };
        assert_eq!(format!("{}", error), "unexpected status from NAVER_API: 429");

        let error = KrxMarketError::NoData {
            provider: "NAVER_POLLING",
        };
        assert_eq!(format!("{}", error), "no data from NAVER_POLLING");
    }
}
