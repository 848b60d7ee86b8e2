//! Reconciliation of inconsistently-encoded price direction indicators.
//!
//! The upstream schemas encode direction three different ways: free-form
//! indicator text (상승/하락/보합), a small enumerated sign code, or a signed
//! numeric string. This module maps all three onto [`Direction`] and applies
//! the result as absolute-value-then-reapply.

/// Direction of change versus the previous close.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    /// Decode the enumerated sign codes used by the polling schema family:
    /// `1` and `4` mean up, `2` and `5` mean down, `3` means flat.
    pub fn from_sign_code(code: &str) -> Option<Self> {
        match code.trim() {
            "1" | "4" => Some(Self::Up),
            "2" | "5" => Some(Self::Down),
            "3" => Some(Self::Flat),
            _ => None,
        }
    }

    /// Detect a direction from free-form indicator text (label fields, page
    /// markup). Recognizes the Korean rise/fall/flat words, limit moves
    /// included.
    pub fn from_indicator_text(text: &str) -> Option<Self> {
        if text.contains("상승") || text.contains("상한") {
            Some(Self::Up)
        } else if text.contains("하락") || text.contains("하한") {
            Some(Self::Down)
        } else if text.contains("보합") {
            Some(Self::Flat)
        } else {
            None
        }
    }

    /// Apply this direction to an unsigned integer magnitude.
    pub fn apply_i64(self, magnitude: i64) -> i64 {
        match self {
            Self::Up => magnitude.abs(),
            Self::Down => -magnitude.abs(),
            Self::Flat => 0,
        }
    }

    /// Apply this direction to an unsigned fractional magnitude.
    pub fn apply_f64(self, magnitude: f64) -> f64 {
        match self {
            Self::Up => magnitude.abs(),
            Self::Down => -magnitude.abs(),
            Self::Flat => 0.0,
        }
    }
}

/// Pick the effective direction for a payload's change values.
///
/// Precedence: the enumerated sign code wins, then indicator text, then an
/// explicit sign carried by the value itself. When only the explicit sign is
/// present it is trusted as-is rather than double-corrected.
pub fn resolve_direction(
    sign_code: Option<Direction>,
    indicator: Option<Direction>,
    explicit: Option<Direction>,
) -> Option<Direction> {
    sign_code.or(indicator).or(explicit)
}
