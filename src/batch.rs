//! バッチ処理
//!
//! 入力URLを1件ずつ順番に処理し、URLごとに必ず1レコードを作る。
//! 1件の失敗は後続の処理を止めない。

use crate::catalog::{CatalogSearch, Sleeper, Verifier};
use crate::error::VerifyError;
use crate::page::{CaptureTargets, PageInspector};
use indicatif::ProgressBar;
use mpn_verify_common::{classify, classify_failure, BatchItem, BatchResults, ResultRecord};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

pub struct BatchRunner<'a, P, C, S> {
    inspector: &'a P,
    verifier: &'a Verifier<C, S>,
    artifact_dir: PathBuf,
    navigation_timeout: Duration,
    progress: ProgressBar,
}

impl<'a, P, C, S> BatchRunner<'a, P, C, S>
where
    P: PageInspector,
    C: CatalogSearch,
    S: Sleeper,
{
    pub fn new(
        inspector: &'a P,
        verifier: &'a Verifier<C, S>,
        artifact_dir: impl Into<PathBuf>,
        navigation_timeout: Duration,
    ) -> Self {
        Self {
            inspector,
            verifier,
            artifact_dir: artifact_dir.into(),
            navigation_timeout,
            progress: ProgressBar::hidden(),
        }
    }

    /// 進捗バーを差し替える（既定は非表示）
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// 全項目を処理してレコード列を返す（入力順）
    pub async fn run(&self, items: &[BatchItem]) -> BatchResults {
        let mut results = BatchResults::with_capacity(items.len());
        self.progress.set_length(items.len() as u64);

        for (idx, item) in items.iter().enumerate() {
            let number = idx + 1;
            info!(number, url = %item.url, "URL処理開始");
            self.progress.set_message(item.url.clone());

            let record = self.process_item(number, item).await;
            info!(number, matching_type = %record.matching_type, "URL処理完了");

            results.push(record);
            self.progress.inc(1);
        }

        self.progress.finish_and_clear();
        results
    }

    async fn process_item(&self, number: usize, item: &BatchItem) -> ResultRecord {
        let targets = CaptureTargets::new(&self.artifact_dir, number);
        if item.url.is_empty() {
            return self.failure(item, &targets, VerifyError::EmptyUrl);
        }

        let capture = match tokio::time::timeout(
            self.navigation_timeout,
            self.inspector.inspect(&item.url, &targets),
        )
        .await
        {
            Ok(Ok(capture)) => capture,
            Ok(Err(e)) => return self.failure(item, &targets, e),
            Err(_) => {
                let e = VerifyError::NavigationTimeout(self.navigation_timeout.as_millis());
                return self.failure(item, &targets, e);
            }
        };

        let verification = match capture.extraction.found_mpn() {
            Some(mpn) => Some(
                self.verifier
                    .verify(mpn, capture.extraction.language.as_deref())
                    .await,
            ),
            None => {
                info!(url = %item.url, "MPNマーカーなし");
                None
            }
        };

        classify(
            item,
            &capture.extraction,
            verification.as_ref(),
            capture.artifact_paths(),
        )
    }

    fn failure(
        &self,
        item: &BatchItem,
        targets: &CaptureTargets,
        e: VerifyError,
    ) -> ResultRecord {
        error!(url = %item.url, error = %e, "URL処理エラー");
        classify_failure(item, &e.to_string(), targets.existing_paths())
    }
}
