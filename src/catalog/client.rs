//! カタログ検索API（Flix360）クライアント

use super::CatalogSearch;
use crate::error::{Result, VerifyError};
use async_trait::async_trait;
use mpn_verify_common::CatalogRecord;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// 検索APIのレスポンス
///
/// `result` が無い・null・空配列はいずれも0件。
#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Option<Vec<CatalogRecord>>,
}

pub struct FlixCatalogClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl FlixCatalogClient {
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self::with_client(http, base_url, api_token))
    }

    pub fn with_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: api_token.into(),
        }
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }
}

#[async_trait]
impl CatalogSearch for FlixCatalogClient {
    async fn search(&self, mpn: &str, language_code: &str) -> Result<Vec<CatalogRecord>> {
        debug!(mpn, language_code, "カタログ検索");

        let response = self
            .http
            .get(self.search_url())
            .bearer_auth(&self.api_token)
            .query(&[
                ("search", mpn),
                ("language_code", language_code),
                ("page", ""),
                ("on_page", ""),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(VerifyError::ApiStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| VerifyError::ApiParse(e.to_string()))?;

        Ok(parsed.result.unwrap_or_default())
    }
}
