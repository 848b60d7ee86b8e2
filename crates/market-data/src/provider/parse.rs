//! Field extraction helpers shared by the provider normalizers.
//!
//! Upstream payloads rename fields across response variants and mix string
//! and numeric encodings for the same value, so extraction probes candidate
//! keys in priority order and accepts either scalar kind.

use serde_json::Value;

use super::sign::Direction;

/// Render a JSON scalar as text; objects, arrays and null yield `None`.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Probe `keys` in order on a JSON object, returning the first scalar hit.
pub fn probe_field(obj: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| obj.get(*key).and_then(scalar_text))
}

/// Parse an integer magnitude from text that may carry thousands separators
/// and sign characters. Returns the magnitude and the explicit sign, if one
/// was present: `"-71,000"` yields `(71000, Some(Direction::Down))`.
pub fn parse_magnitude_i64(text: &str) -> Option<(i64, Option<Direction>)> {
    let text = text.trim();
    let explicit = explicit_sign(text)?;
    let unsigned = text.trim_start_matches(['+', '-']).replace(',', "");
    // tolerate a fractional tail; prices and changes are whole KRW
    let integral = unsigned.split('.').next().unwrap_or_default();
    if integral.is_empty() || !integral.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    integral.parse().ok().map(|magnitude| (magnitude, explicit))
}

/// Parse a fractional magnitude, stripping separators and percent signs:
/// `"+0.71%"` yields `(0.71, Some(Direction::Up))`.
pub fn parse_magnitude_f64(text: &str) -> Option<(f64, Option<Direction>)> {
    let text = text.trim();
    let explicit = explicit_sign(text)?;
    let cleaned = text.trim_start_matches(['+', '-']).replace([',', '%'], "");
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    cleaned
        .parse::<f64>()
        .ok()
        .map(|magnitude| (magnitude.abs(), explicit))
}

/// Round to two decimal places, the canonical change-rate precision.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Leading sign of a numeric string. `None` for empty input (nothing to parse).
fn explicit_sign(text: &str) -> Option<Option<Direction>> {
    match text.chars().next()? {
        '-' => Some(Some(Direction::Down)),
        '+' => Some(Some(Direction::Up)),
        _ => Some(None),
    }
}
