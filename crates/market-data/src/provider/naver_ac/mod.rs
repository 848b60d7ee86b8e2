//! Autocomplete search provider (schema-stable primary).

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::KrxMarketError;
use crate::models::SearchResult;
use crate::provider::headers::stock_api_headers;
use crate::provider::traits::SearchSource;

const BASE_URL: &str = "https://ac.stock.naver.com/ac";
const PROVIDER_ID: &str = "NAVER_AC";

#[derive(Debug, Deserialize)]
struct AcResponse {
    #[serde(default)]
    items: Vec<AcItem>,
}

#[derive(Debug, Deserialize)]
struct AcItem {
    #[serde(default)]
    code: String,
    #[serde(default)]
    name: String,
}

/// Search provider backed by the autocomplete endpoint.
pub struct NaverAcProvider {
    client: Client,
}

impl NaverAcProvider {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .default_headers(stock_api_headers())
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    async fn fetch(&self, query: &str) -> Result<String, KrxMarketError> {
        let response = self
            .client
            .get(BASE_URL)
            .query(&[("q", query)])
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
impl SearchSource for NaverAcProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, KrxMarketError> {
        let body = self.fetch(query).await?;
        let results = normalize_autocomplete(&body)?;
        debug!(
            "{}: {} results for {:?}",
            PROVIDER_ID,
            results.len(),
            query
        );
        Ok(results)
    }
}

/// Normalize an autocomplete payload. Items with a blank code or name are
/// skipped; the endpoint is assumed not to produce duplicates.
pub fn normalize_autocomplete(body: &str) -> Result<Vec<SearchResult>, KrxMarketError> {
    let response: AcResponse = serde_json::from_str(body).map_err(|e| KrxMarketError::Parse {
        provider: PROVIDER_ID,
        message: e.to_string(),
    })?;

    Ok(response
        .items
        .into_iter()
        .filter(|item| !item.code.trim().is_empty() && !item.name.trim().is_empty())
        .map(|item| SearchResult::new(item.name.trim(), item.code.trim()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_items() {
        let body = r#"{"items": [
            {"code": "005930", "name": "삼성전자"},
            {"code": "005935", "name": "삼성전자우"}
        ]}"#;
        let results = normalize_autocomplete(body).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].code, "005930");
        assert_eq!(results[0].name, "삼성전자");
    }

    #[test]
    fn test_codes_are_uppercased() {
        let body = r#"{"items": [{"code": "q50001x", "name": "Some ETN"}]}"#;
        let results = normalize_autocomplete(body).unwrap();

        assert_eq!(results[0].code, "Q50001X");
    }

    #[test]
    fn test_blank_entries_are_skipped() {
        let body = r#"{"items": [
            {"code": "", "name": "이름만"},
            {"code": "005930", "name": ""},
            {"code": "000660", "name": "SK하이닉스"}
        ]}"#;
        let results = normalize_autocomplete(body).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].code, "000660");
    }

    #[test]
    fn test_missing_items_key_is_empty() {
        let results = normalize_autocomplete(r#"{"query": "삼성"}"#).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = normalize_autocomplete("not json").unwrap_err();
        assert!(matches!(err, KrxMarketError::Parse { .. }));
    }
}
