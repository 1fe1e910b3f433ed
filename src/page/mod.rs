//! 商品ページの読み込みとマーカー抽出
//!
//! ページ操作は `PageInspector` の実装に任せ、バッチ側は抽出結果と
//! 成果物のパスだけを受け取る。

pub mod markers;
mod http;

pub use http::HttpPageInspector;

use crate::error::Result;
use async_trait::async_trait;
use mpn_verify_common::ExtractionResult;
use std::path::{Path, PathBuf};

/// 成果物の保存先（URL通し番号ごと）
#[derive(Debug, Clone)]
pub struct CaptureTargets {
    dir: PathBuf,
    index: usize,
}

impl CaptureTargets {
    pub fn new(dir: &Path, index: usize) -> Self {
        Self {
            dir: dir.to_path_buf(),
            index,
        }
    }

    /// `<prefix>_<index>.<ext>`
    pub fn path(&self, prefix: &str, extension: &str) -> PathBuf {
        self.dir.join(format!("{}_{}.{}", prefix, self.index, extension))
    }

    /// 既に書き出された成果物（失敗時のレコード用）
    pub fn existing_paths(&self) -> Vec<String> {
        let written: Vec<PathBuf> = ARTIFACT_NAMES
            .iter()
            .map(|(prefix, ext)| self.path(prefix, ext))
            .filter(|p| p.exists())
            .collect();
        display_paths(&written)
    }
}

/// 成果物のファイル名（操作前、操作後、ページ本文）
pub const ARTIFACT_NAMES: [(&str, &str); 3] =
    [("initial", "png"), ("final", "png"), ("page", "html")];

fn display_paths(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.display().to_string().replace('\\', "/"))
        .collect()
}

/// ページ1件の取得結果
#[derive(Debug, Clone, Default)]
pub struct PageCapture {
    pub extraction: ExtractionResult,
    /// 保存した成果物（操作前、操作後の順）
    pub artifacts: Vec<PathBuf>,
}

impl PageCapture {
    pub fn artifact_paths(&self) -> Vec<String> {
        display_paths(&self.artifacts)
    }
}

#[async_trait]
pub trait PageInspector: Send + Sync {
    async fn inspect(&self, url: &str, targets: &CaptureTargets) -> Result<PageCapture>;
}
