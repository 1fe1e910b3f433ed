//! 検証結果の型定義
//!
//! CLIとレポート出力で共有される型:
//! - ExtractionResult: ページから抽出したMPNマーカー
//! - VerificationResult: カタログ照合の結果
//! - ResultRecord: URLごとの最終レコード

use serde::{Deserialize, Serialize};
use std::fmt;

/// 入力行（URLと期待MPN）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    pub url: String,
    /// スプレッドシート上のMPN（ExcelMPN列）
    pub expected_mpn: String,
}

impl BatchItem {
    pub fn new(url: impl Into<String>, expected_mpn: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            expected_mpn: expected_mpn.into(),
        }
    }
}

/// ページから抽出したマーカー
///
/// `mpn` が `None`（または空文字）の場合は「マーカーなし」を表す。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractionResult {
    pub mpn: Option<String>,
    pub language: Option<String>,
}

impl ExtractionResult {
    /// 空白のみのMPNも未検出として扱う
    pub fn found_mpn(&self) -> Option<&str> {
        self.mpn
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}

/// カタログ検索APIの1レコード
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogRecord {
    /// カンマ区切りで複数MPNを持つことがある
    pub mpn: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CatalogRecord {
    pub fn with_mpn(mpn: impl Into<String>) -> Self {
        Self {
            mpn: Some(mpn.into()),
            ..Default::default()
        }
    }
}

/// 展開済みの候補MPN（レコード番号付き）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MpnCandidate {
    pub token: String,
    pub record_index: usize,
}

/// 1候補に対する類似度判定
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityOutcome {
    pub candidate: String,
    pub score: f64,
    pub accepted: bool,
}

/// カタログ照合のステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationStatus {
    Hit,
    Miss,
    Error,
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationStatus::Hit => write!(f, "Hit"),
            VerificationStatus::Miss => write!(f, "Miss"),
            VerificationStatus::Error => write!(f, "Error"),
        }
    }
}

/// カタログ照合結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub status: VerificationStatus,
    pub reason: String,
    pub matched_candidate: Option<String>,
    pub similarity: Option<f64>,
    /// APIが返した全レコードのMPN（返却順）
    pub all_candidates: Vec<String>,
}

impl VerificationResult {
    pub fn hit(token: &str, similarity: f64, all_candidates: Vec<String>) -> Self {
        Self {
            status: VerificationStatus::Hit,
            reason: format!("Match found: {}", token),
            matched_candidate: Some(token.to_string()),
            similarity: Some(similarity),
            all_candidates,
        }
    }

    pub fn miss(reason: impl Into<String>, similarity: Option<f64>, all_candidates: Vec<String>) -> Self {
        Self {
            status: VerificationStatus::Miss,
            reason: reason.into(),
            matched_candidate: None,
            similarity,
            all_candidates,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: VerificationStatus::Error,
            reason: message.into(),
            matched_candidate: None,
            similarity: None,
            all_candidates: Vec::new(),
        }
    }
}

/// URLごとの判定区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchingType {
    Hit,
    Miss,
    Error,
    #[serde(rename = "No MPN Found")]
    NoMpnFound,
}

impl MatchingType {
    pub const ALL: [MatchingType; 4] = [
        MatchingType::Hit,
        MatchingType::Miss,
        MatchingType::NoMpnFound,
        MatchingType::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchingType::Hit => "Hit",
            MatchingType::Miss => "Miss",
            MatchingType::Error => "Error",
            MatchingType::NoMpnFound => "No MPN Found",
        }
    }

    /// HTMLのクラス名・フィルタ値に使うスラッグ
    pub fn slug(&self) -> &'static str {
        match self {
            MatchingType::Hit => "hit",
            MatchingType::Miss => "miss",
            MatchingType::Error => "error",
            MatchingType::NoMpnFound => "no-mpn-found",
        }
    }
}

impl From<VerificationStatus> for MatchingType {
    fn from(status: VerificationStatus) -> Self {
        match status {
            VerificationStatus::Hit => MatchingType::Hit,
            VerificationStatus::Miss => MatchingType::Miss,
            VerificationStatus::Error => MatchingType::Error,
        }
    }
}

impl fmt::Display for MatchingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 期待MPNとの完全一致（正規化後）判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchStatus {
    /// MPN未検出
    #[default]
    #[serde(rename = "")]
    NotApplicable,
    Matched,
    Unmatched,
    Error,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::NotApplicable => "",
            MatchStatus::Matched => "Matched",
            MatchStatus::Unmatched => "Unmatched",
            MatchStatus::Error => "Error",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// URLの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UrlClassification {
    Product,
    #[serde(rename = "Category/General")]
    CategoryGeneral,
    Error,
}

impl UrlClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrlClassification::Product => "Product",
            UrlClassification::CategoryGeneral => "Category/General",
            UrlClassification::Error => "Error",
        }
    }
}

impl fmt::Display for UrlClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// URLごとの最終レコード
///
/// 生成後は変更しない（フィールドは読み取り専用として扱う）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub url: String,
    pub language: String,
    pub expected_mpn: String,
    pub extracted_mpn: String,
    pub match_status: MatchStatus,
    pub url_classification: UrlClassification,
    pub matching_type: MatchingType,
    pub details: String,
    /// カタログMPNの表示用文字列（", " 区切り）
    pub candidate_list: String,
    pub screenshot_paths: Vec<String>,
}

impl ResultRecord {
    /// 操作前のページ成果物
    pub fn initial_artifact(&self) -> Option<&str> {
        self.screenshot_paths.first().map(String::as_str)
    }

    /// 操作後のページ成果物
    pub fn final_artifact(&self) -> Option<&str> {
        self.screenshot_paths.get(1).map(String::as_str)
    }
}
