//! Naver mobile stock API provider (primary quote source).
//!
//! Serves `m.stock.naver.com/api/stock/{code}/basic` style JSON. The same
//! schema family is mirrored on `api.stock.naver.com`, which this module also
//! covers as a pure availability fallback. Field names drift across response
//! variants, so extraction probes several candidate keys per value.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;

use crate::errors::KrxMarketError;
use crate::models::Quote;
use crate::provider::headers::stock_api_headers;
use crate::provider::parse::{
    parse_magnitude_f64, parse_magnitude_i64, probe_field, round2, scalar_text,
};
use crate::provider::sign::{resolve_direction, Direction};
use crate::provider::traits::QuoteSource;

const PRIMARY_BASE_URL: &str = "https://m.stock.naver.com/api/stock";
const FALLBACK_BASE_URL: &str = "https://api.stock.naver.com/stock";

/// Candidate keys for the current price, most common first.
const PRICE_KEYS: &[&str] = &["closePrice", "currentPrice", "tradePrice", "now"];
/// Candidate keys for the change versus the previous close.
const CHANGE_KEYS: &[&str] = &["compareToPreviousClosePrice", "changeValue", "change"];
/// Candidate keys for the change rate.
const RATE_KEYS: &[&str] = &["fluctuationsRatio", "changeRate", "rate"];
/// Candidate keys for the issue name.
const NAME_KEYS: &[&str] = &["stockName", "itemName", "name"];
/// Title-style fields carry a page suffix after a colon separator.
const TITLE_KEYS: &[&str] = &["title", "pageTitle"];

/// Quote provider for the basic-endpoint schema family.
pub struct NaverBasicProvider {
    id: &'static str,
    client: Client,
    base_url: &'static str,
}

impl NaverBasicProvider {
    /// Primary host; richest payload, most accurate, tried first.
    pub fn primary(timeout: Duration) -> Self {
        Self::with_base_url("NAVER_M", PRIMARY_BASE_URL, timeout)
    }

    /// Alternate host mirroring the same schema; availability fallback only.
    pub fn fallback(timeout: Duration) -> Self {
        Self::with_base_url("NAVER_API", FALLBACK_BASE_URL, timeout)
    }

    fn with_base_url(id: &'static str, base_url: &'static str, timeout: Duration) -> Self {
        let client = Client::builder()
            .default_headers(stock_api_headers())
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            id,
            client,
            base_url,
        }
    }

    async fn fetch(&self, code: &str) -> Result<String, KrxMarketError> {
        let url = format!("{}/{}/basic", self.base_url, code);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(KrxMarketError::Status {
                provider: self.id,
                status: response.status().as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl QuoteSource for NaverBasicProvider {
    fn id(&self) -> &'static str {
        self.id
    }

    async fn fetch_quote(&self, code: &str) -> Result<Quote, KrxMarketError> {
        let body = self.fetch(code).await?;
        let quote = normalize_basic(self.id, code, &body)?;
        debug!("{}: normalized quote for {}", self.id, code);
        Ok(quote)
    }
}

/// Convert one basic-endpoint payload into a canonical quote.
///
/// Pure function: malformed input yields an error, never a panic. A payload
/// without a strictly positive price is "no result".
pub fn normalize_basic(
    provider: &'static str,
    code: &str,
    body: &str,
) -> Result<Quote, KrxMarketError> {
    let root: Value = serde_json::from_str(body).map_err(|e| KrxMarketError::Parse {
        provider,
        message: e.to_string(),
    })?;

    let price_text = probe_field(&root, PRICE_KEYS).ok_or(KrxMarketError::NoData { provider })?;
    let (price, _) =
        parse_magnitude_i64(&price_text).ok_or_else(|| KrxMarketError::Parse {
            provider,
            message: format!("unparsable price: {:?}", price_text),
        })?;
    if price <= 0 {
        return Err(KrxMarketError::NoData { provider });
    }

    let name = extract_name(&root).unwrap_or_else(|| code.to_string());

    // Direction indicators, strongest first: the enumerated sign code under
    // compareToPreviousPrice, then its label text, then any explicit sign on
    // the change values themselves.
    let sign_field = root.get("compareToPreviousPrice");
    let sign_code = sign_field
        .and_then(|v| v.get("code"))
        .and_then(scalar_text)
        .and_then(|code| Direction::from_sign_code(&code));
    let indicator = sign_field
        .and_then(|v| v.get("text"))
        .and_then(Value::as_str)
        .and_then(Direction::from_indicator_text);

    let (change_magnitude, change_sign) = probe_field(&root, CHANGE_KEYS)
        .as_deref()
        .and_then(parse_magnitude_i64)
        .unwrap_or((0, None));
    let (rate_magnitude, rate_sign) = probe_field(&root, RATE_KEYS)
        .as_deref()
        .and_then(parse_magnitude_f64)
        .unwrap_or((0.0, None));

    let direction = resolve_direction(sign_code, indicator, change_sign.or(rate_sign))
        .unwrap_or(Direction::Flat);

    Ok(Quote {
        code: code.to_string(),
        name,
        price,
        change: direction.apply_i64(change_magnitude),
        change_rate: round2(direction.apply_f64(rate_magnitude)),
    })
}

/// Probe name fields first, then title-style fields whose page suffix after
/// the colon separator is dropped ("현대차2우B : 네이버페이 증권" → "현대차2우B").
fn extract_name(root: &Value) -> Option<String> {
    if let Some(name) = probe_field(root, NAME_KEYS) {
        let name = name.trim();
        if !name.is_empty() {
            return Some(name.to_string());
        }
    }

    let title = probe_field(root, TITLE_KEYS)?;
    let head = title.split(':').next().unwrap_or_default().trim();
    if head.is_empty() {
        None
    } else {
        Some(head.to_string())
    }
}
