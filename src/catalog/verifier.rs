//! リトライ付きのカタログ照合

use super::retry::{RetryPolicy, Sleeper, TokioSleeper};
use super::CatalogSearch;
use mpn_verify_common::{match_candidates, normalize_language_code, VerificationResult};
use tracing::{debug, info, warn};

/// カタログ照合（リトライ付き）
///
/// 失敗は返り値の `Error` ステータスとして表し、呼び出し側には投げない。
pub struct Verifier<C, S = TokioSleeper> {
    catalog: C,
    policy: RetryPolicy,
    sleeper: S,
}

impl<C: CatalogSearch> Verifier<C, TokioSleeper> {
    pub fn new(catalog: C, policy: RetryPolicy) -> Self {
        Self::with_sleeper(catalog, policy, TokioSleeper)
    }
}

impl<C: CatalogSearch, S: Sleeper> Verifier<C, S> {
    pub fn with_sleeper(catalog: C, policy: RetryPolicy, sleeper: S) -> Self {
        Self {
            catalog,
            policy,
            sleeper,
        }
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// MPNをカタログで検証する
    ///
    /// # Arguments
    /// * `mpn` - ページから抽出したMPN（空でないこと）
    /// * `language` - ページの言語（未正規化）
    pub async fn verify(&self, mpn: &str, language: Option<&str>) -> VerificationResult {
        let language_code = normalize_language_code(language);
        info!(mpn, language_code = %language_code, "MPN照合");

        let max_attempts = self.policy.max_attempts();
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            match self.catalog.search(mpn, &language_code).await {
                Ok(records) => {
                    debug!(attempt, records = records.len(), "検索結果を受信");
                    let result = match_candidates(mpn, &records);
                    info!(status = %result.status, reason = %result.reason, "照合結果");
                    return result;
                }
                Err(e) => {
                    last_error = e.to_string();
                    if attempt < max_attempts {
                        let delay = self.policy.delay_for(attempt);
                        warn!(
                            attempt,
                            max_attempts,
                            delay_ms = delay.as_millis() as u64,
                            error = %last_error,
                            "カタログ検索失敗、リトライします"
                        );
                        self.sleeper.sleep(delay).await;
                    }
                }
            }
        }

        warn!(mpn, error = %last_error, "リトライ上限に達しました");
        VerificationResult::error(last_error)
    }
}
