//! HTTP headers for Naver Finance endpoints.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER, USER_AGENT};

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15";

/// Create headers for the m.stock / api.stock JSON endpoints.
pub fn stock_api_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        REFERER,
        HeaderValue::from_static("https://m.stock.naver.com/"),
    );
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers
}

/// Create headers for the legacy polling endpoint.
pub fn polling_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/plain, application/json"),
    );
    headers.insert(
        REFERER,
        HeaderValue::from_static("https://finance.naver.com/"),
    );
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers
}
