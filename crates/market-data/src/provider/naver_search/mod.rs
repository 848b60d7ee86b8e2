//! Secondary full-search provider.
//!
//! The response shape varies across deployments: the result list has been
//! observed under several different nesting paths, and item fields drift
//! between long and short key names. Normalization probes all known
//! candidates before concluding the payload holds no results.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;

use crate::constants::CODE_LEN;
use crate::errors::KrxMarketError;
use crate::models::SearchResult;
use crate::provider::headers::stock_api_headers;
use crate::provider::parse::probe_field;
use crate::provider::traits::SearchSource;

const BASE_URL: &str = "https://m.stock.naver.com/api/search/all";
const PROVIDER_ID: &str = "NAVER_SEARCH";

/// Paths under which deployments nest the result list.
const LIST_PATHS: &[&str] = &[
    "/stocks",
    "/result/stocks",
    "/result/items",
    "/items",
    "/datas",
];
const ITEM_CODE_KEYS: &[&str] = &["code", "itemCode", "cd"];
const ITEM_NAME_KEYS: &[&str] = &["name", "stockName", "itemName", "nm"];

/// Search provider backed by the full-search endpoint.
pub struct NaverSearchProvider {
    client: Client,
}

impl NaverSearchProvider {
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
            .query(&[("keyword", query)])
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
impl SearchSource for NaverSearchProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, KrxMarketError> {
        let body = self.fetch(query).await?;
        let results = normalize_search(&body)?;
        debug!(
            "{}: {} results for {:?}",
            PROVIDER_ID,
            results.len(),
            query
        );
        Ok(results)
    }
}

/// Normalize a full-search payload, deduplicating by code.
///
/// Entries without a code of the expected width are dropped; the endpoint
/// mixes securities with news and board hits.
pub fn normalize_search(body: &str) -> Result<Vec<SearchResult>, KrxMarketError> {
    let root: Value = serde_json::from_str(body).map_err(|e| KrxMarketError::Parse {
        provider: PROVIDER_ID,
        message: e.to_string(),
    })?;

    let list = LIST_PATHS
        .iter()
        .find_map(|path| root.pointer(path).and_then(Value::as_array))
        .ok_or(KrxMarketError::NoData {
            provider: PROVIDER_ID,
        })?;

    let mut seen = HashSet::new();
    let mut results = Vec::new();
    for item in list {
        let code = match probe_field(item, ITEM_CODE_KEYS) {
            Some(code) => code.trim().to_ascii_uppercase(),
            None => continue,
        };
        if code.len() != CODE_LEN || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            continue;
        }
        let name = match probe_field(item, ITEM_NAME_KEYS) {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => continue,
        };
        if !seen.insert(code.clone()) {
            continue;
        }
        results.push(SearchResult::new(name, code));
    }
    Ok(results)
}
