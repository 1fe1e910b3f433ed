//! カタログ照合モジュール
//!
//! - client: 検索APIへのHTTPアクセス
//! - retry: リトライ方針と待機
//! - verifier: リトライ付き照合（判定は common 側）

mod client;
pub mod retry;
mod verifier;

pub use client::FlixCatalogClient;
pub use retry::{Backoff, RecordingSleeper, RetryPolicy, Sleeper, TokioSleeper};
pub use verifier::Verifier;

use crate::error::Result;
use async_trait::async_trait;
use mpn_verify_common::CatalogRecord;

/// カタログ検索
///
/// 0件は `Ok(vec![])`、非2xx・通信失敗・不正JSONは `Err`（リトライ対象）。
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    async fn search(&self, mpn: &str, language_code: &str) -> Result<Vec<CatalogRecord>>;
}

