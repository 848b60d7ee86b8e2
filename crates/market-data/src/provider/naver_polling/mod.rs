//! Legacy polling endpoint provider (last-resort quote source).
//!
//! Keyed by a `SERVICE_ITEM:<code>` query token; the body is JSON-like text
//! that does not always survive a strict parse, so normalization goes through
//! [`parse_lenient`] first. The record of interest sits at
//! `result.areas[0].datas[0]` with short field names: `nv` (price), `cv`
//! (change), `cr` (rate), `nm` (name), `sv` (sign code).

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::errors::KrxMarketError;
use crate::models::Quote;
use crate::provider::headers::polling_headers;
use crate::provider::lenient::parse_lenient;
use crate::provider::parse::{parse_magnitude_f64, parse_magnitude_i64, probe_field, round2};
use crate::provider::sign::{resolve_direction, Direction};
use crate::provider::traits::QuoteSource;

const BASE_URL: &str = "https://polling.finance.naver.com/api/realtime";
const PROVIDER_ID: &str = "NAVER_POLLING";

/// Quote provider for the legacy realtime polling endpoint.
pub struct NaverPollingProvider {
    client: Client,
}

impl NaverPollingProvider {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .default_headers(polling_headers())
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    async fn fetch(&self, code: &str) -> Result<String, KrxMarketError> {
        let query = format!("SERVICE_ITEM:{}", code);
        let response = self
            .client
            .get(BASE_URL)
            .query(&[("query", query.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(KrxMarketError::Status {
                provider: PROVIDER_ID,
                status: response.status().as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl QuoteSource for NaverPollingProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_quote(&self, code: &str) -> Result<Quote, KrxMarketError> {
        let body = self.fetch(code).await?;
        let quote = normalize_polling(code, &body)?;
        debug!("{}: normalized quote for {}", PROVIDER_ID, code);
        Ok(quote)
    }
}

/// Normalize the first `datas` record of a polling payload.
///
/// `cv`/`cr` sometimes arrive already signed; the `sv` sign code wins when
/// both are present.
pub fn normalize_polling(code: &str, body: &str) -> Result<Quote, KrxMarketError> {
    let root = parse_lenient(body).ok_or_else(|| KrxMarketError::Parse {
        provider: PROVIDER_ID,
        message: "payload is not JSON-like".to_string(),
    })?;

    let data = root
        .pointer("/result/areas/0/datas/0")
        .ok_or(KrxMarketError::NoData {
            provider: PROVIDER_ID,
        })?;

    let (price, _) = probe_field(data, &["nv"])
        .as_deref()
        .and_then(parse_magnitude_i64)
        .ok_or(KrxMarketError::NoData {
            provider: PROVIDER_ID,
        })?;
    if price <= 0 {
        return Err(KrxMarketError::NoData {
            provider: PROVIDER_ID,
        });
    }

    let name = probe_field(data, &["nm"])
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| code.to_string());

    let sign_code = probe_field(data, &["sv"])
        .as_deref()
        .and_then(Direction::from_sign_code);
    let (change_magnitude, change_sign) = probe_field(data, &["cv"])
        .as_deref()
        .and_then(parse_magnitude_i64)
        .unwrap_or((0, None));
    let (rate_magnitude, rate_sign) = probe_field(data, &["cr"])
        .as_deref()
        .and_then(parse_magnitude_f64)
        .unwrap_or((0.0, None));

    let direction = resolve_direction(sign_code, None, change_sign.or(rate_sign))
        .unwrap_or(Direction::Flat);

    Ok(Quote {
        code: code.to_string(),
        name,
        price,
        change: direction.apply_i64(change_magnitude),
        change_rate: round2(direction.apply_f64(rate_magnitude)),
    })
}
