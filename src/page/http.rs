use super::{markers, CaptureTargets, PageCapture, PageInspector};
use crate::error::{Result, VerifyError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// HTTPでページを取得してマーカーを抽出する
///
/// 取得したHTMLを `page_<n>.html` として保存する。
pub struct HttpPageInspector {
    http: reqwest::Client,
}

impl HttpPageInspector {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mpn-verify/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl PageInspector for HttpPageInspector {
    async fn inspect(&self, url: &str, targets: &CaptureTargets) -> Result<PageCapture> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| VerifyError::Navigation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VerifyError::Navigation(format!("{} responded {}", url, status)));
        }

        let html = response
            .text()
            .await
            .map_err(|e| VerifyError::Navigation(e.to_string()))?;

        let snapshot = targets.path("page", "html");
        if let Some(parent) = snapshot.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&snapshot, &html).await?;

        let extraction = markers::extract(&html);
        debug!(url, mpn = ?extraction.mpn, language = ?extraction.language, "マーカー抽出");

        Ok(PageCapture {
            extraction,
            artifacts: vec![snapshot],
        })
    }
}
