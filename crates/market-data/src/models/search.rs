//! Search result model for name/code lookup.

use serde::{Deserialize, Serialize};

/// Result from a name/code search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Issue name (e.g. "삼성전자")
    pub name: String,

    /// Issue code, uppercase-normalized (e.g. "005930")
    pub code: String,
}

impl SearchResult {
    /// Create a search result, uppercasing the code.
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into().to_ascii_uppercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uppercases_code() {
        let result = SearchResult::new("카카오", "035720");
        assert_eq!(result.code, "035720");

        let result = SearchResult::new("Some ETN", "q50001x");
        assert_eq!(result.code, "Q50001X");
    }
}
