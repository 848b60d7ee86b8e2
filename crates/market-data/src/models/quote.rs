//! Canonical quote model.

use serde::{Deserialize, Serialize};

/// A normalized quote for one KRX issue.
///
/// Invariants maintained by the normalizers: `price` is strictly positive,
/// and `change` and `change_rate` carry the same sign unless both are zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Issue code (e.g. "005930")
    pub code: String,

    /// Issue name as reported upstream
    pub name: String,

    /// Last traded price in KRW; always strictly positive
    pub price: i64,

    /// Signed change versus the previous close
    pub change: i64,

    /// Signed change rate in percent, rounded to two decimals
    pub change_rate: f64,
}

impl Quote {
    /// Price rendered with thousands separators, e.g. `71,000`.
    pub fn price_str(&self) -> String {
        format_thousands(self.price)
    }

    /// Whether `change` and `change_rate` agree in sign (both zero counts).
    pub fn is_sign_consistent(&self) -> bool {
        let change_sign = self.change.signum();
        let rate_sign = if self.change_rate > 0.0 {
            1
        } else if self.change_rate < 0.0 {
            -1
        } else {
            0
        };
        change_sign == rate_sign
    }
}

/// Group digits in threes, preserving a leading minus.
pub(crate) fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if n < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(price: i64, change: i64, change_rate: f64) -> Quote {
        Quote {
            code: "005930".to_string(),
            name: "삼성전자".to_string(),
            price,
            change,
            change_rate,
        }
    }

    #[test]
    fn test_price_str_groups_thousands() {
        assert_eq!(quote(71_000, 0, 0.0).price_str(), "71,000");
        assert_eq!(quote(1_234_567, 0, 0.0).price_str(), "1,234,567");
        assert_eq!(quote(100, 0, 0.0).price_str(), "100");
        assert_eq!(quote(1_000, 0, 0.0).price_str(), "1,000");
    }

    #[test]
    fn test_sign_consistency() {
        assert!(quote(71_000, 500, 0.71).is_sign_consistent());
        assert!(quote(71_000, -500, -0.71).is_sign_consistent());
        assert!(quote(71_000, 0, 0.0).is_sign_consistent());
        assert!(!quote(71_000, 500, -0.71).is_sign_consistent());
        assert!(!quote(71_000, 0, 0.71).is_sign_consistent());
    }

    #[test]
    fn test_serializes_with_camel_case_rate() {
        let value = serde_json::to_value(quote(71_000, 500, 0.71)).unwrap();
        assert_eq!(value["changeRate"], 0.71);
        assert_eq!(value["price"], 71_000);
        assert!(value.get("change_rate").is_none());
    }
}
