//! Relaxed parsing for JSON-like payloads.
//!
//! The legacy polling endpoint occasionally emits payloads that are not
//! strict JSON: single-quoted strings and bare `True`/`False`/`None`-style
//! tokens. The fallback here rewrites those tokens structurally and then
//! re-parses with serde. The rewrite is string-aware (quoted content is never
//! altered) and substitutes literal tokens only; no content is ever
//! evaluated.

use serde_json::Value;

/// Parse `text` as JSON, falling back to a token-substitution pass.
pub fn parse_lenient(text: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(text) {
        return Some(value);
    }
    serde_json::from_str(&sanitize(text)).ok()
}

/// Rewrite JSON-adjacent syntax into strict JSON.
///
/// Walks the input once, tracking string state: outside strings, bare word
/// tokens are mapped onto their JSON equivalents; single-quoted strings are
/// converted to double-quoted ones with the necessary re-escaping.
fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string: Option<char> = None;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        match in_string {
            Some(quote) => {
                if escaped {
                    escaped = false;
                    out.push(c);
                } else if c == '\\' {
                    if quote == '\'' && chars.peek() == Some(&'\'') {
                        // \' has no meaning in JSON; emit the quote bare
                        chars.next();
                        out.push('\'');
                    } else {
                        escaped = true;
                        out.push(c);
                    }
                } else if c == quote {
                    in_string = None;
                    out.push('"');
                } else if c == '"' && quote == '\'' {
                    out.push('\\');
                    out.push('"');
                } else {
                    out.push(c);
                }
            }
            None => {
                if c == '"' || c == '\'' {
                    in_string = Some(c);
                    out.push('"');
                } else if c.is_ascii_alphabetic() {
                    let mut word = String::new();
                    word.push(c);
                    while let Some(&next) = chars.peek() {
                        if next.is_ascii_alphanumeric() || next == '_' {
                            word.push(next);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    let replacement = match word.as_str() {
                        "True" => "true",
                        "False" => "false",
                        "None" | "NaN" | "undefined" | "Infinity" => "null",
                        other => other,
                    };
                    out.push_str(replacement);
                } else {
                    out.push(c);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strict_json_passes_through() {
        let value = parse_lenient(r#"{"nv": 71000, "ok": true}"#).unwrap();
        assert_eq!(value, json!({"nv": 71000, "ok": true}));
    }

    #[test]
    fn test_bare_python_tokens_are_substituted() {
        let value = parse_lenient(r#"{"up": True, "halt": False, "ref": None}"#).unwrap();
        assert_eq!(value, json!({"up": true, "halt": false, "ref": null}));
    }

    #[test]
    fn test_nan_becomes_null() {
        let value = parse_lenient(r#"{"cr": NaN}"#).unwrap();
        assert_eq!(value, json!({"cr": null}));
    }

    #[test]
    fn test_single_quoted_strings_are_converted() {
        let value = parse_lenient("{'nm': '삼성전자', 'nv': 71000}").unwrap();
        assert_eq!(value, json!({"nm": "삼성전자", "nv": 71000}));
    }

    #[test]
    fn test_tokens_inside_strings_are_untouched() {
        let value = parse_lenient(r#"{"nm": "True None Value"}"#).unwrap();
        assert_eq!(value, json!({"nm": "True None Value"}));

        let value = parse_lenient("{'nm': 'None'}").unwrap();
        assert_eq!(value, json!({"nm": "None"}));
    }

    #[test]
    fn test_embedded_double_quote_is_escaped() {
        let value = parse_lenient(r#"{'nm': 'A "B" C'}"#).unwrap();
        assert_eq!(value, json!({"nm": "A \"B\" C"}));
    }

    #[test]
    fn test_garbage_stays_unparsable() {
        assert!(parse_lenient("<html>Service Unavailable</html>").is_none());
        assert!(parse_lenient("").is_none());
    }
}
