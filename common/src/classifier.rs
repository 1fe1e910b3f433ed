//! 判定区分の決定とレコード組み立て
//!
//! I/Oなし・決定的。抽出結果と照合結果からResultRecordを作る。

use crate::normalizer::normalize_mpn;
use crate::types::{
    BatchItem, ExtractionResult, MatchStatus, MatchingType, ResultRecord, UrlClassification,
    VerificationResult,
};

pub const DETAILS_NO_MPN: &str = "No MPN is found";
pub const CANDIDATE_SEPARATOR: &str = ", ";

/// 抽出MPNと期待MPNの完全一致（正規化後）判定
pub fn match_status(extracted_mpn: &str, expected_mpn: &str) -> MatchStatus {
    if normalize_mpn(extracted_mpn) == normalize_mpn(expected_mpn) {
        MatchStatus::Matched
    } else {
        MatchStatus::Unmatched
    }
}

/// URL1件分のレコードを組み立てる
///
/// # Arguments
/// * `item` - 入力行
/// * `extraction` - ページ抽出結果
/// * `verification` - カタログ照合結果（MPN未検出時は `None`）
/// * `screenshot_paths` - ページ成果物のパス
pub fn classify(
    item: &BatchItem,
    extraction: &ExtractionResult,
    verification: Option<&VerificationResult>,
    screenshot_paths: Vec<String>,
) -> ResultRecord {
    let language = extraction.language.clone().unwrap_or_default();

    let Some(mpn) = extraction.found_mpn() else {
        return ResultRecord {
            url: item.url.clone(),
            language,
            expected_mpn: item.expected_mpn.clone(),
            extracted_mpn: String::new(),
            match_status: MatchStatus::NotApplicable,
            url_classification: UrlClassification::CategoryGeneral,
            matching_type: MatchingType::NoMpnFound,
            details: DETAILS_NO_MPN.to_string(),
            candidate_list: String::new(),
            screenshot_paths,
        };
    };

    let (matching_type, details, candidate_list) = match verification {
        Some(v) => (
            MatchingType::from(v.status),
            v.reason.clone(),
            v.all_candidates.join(CANDIDATE_SEPARATOR),
        ),
        None => (MatchingType::NoMpnFound, DETAILS_NO_MPN.to_string(), String::new()),
    };

    ResultRecord {
        url: item.url.clone(),
        language,
        expected_mpn: item.expected_mpn.clone(),
        extracted_mpn: mpn.to_string(),
        match_status: match_status(mpn, &item.expected_mpn),
        url_classification: UrlClassification::Product,
        matching_type,
        details,
        candidate_list,
        screenshot_paths,
    }
}

/// 処理中に失敗したURLのレコード
pub fn classify_failure(
    item: &BatchItem,
    message: &str,
    screenshot_paths: Vec<String>,
) -> ResultRecord {
    ResultRecord {
        url: item.url.clone(),
        language: String::new(),
        expected_mpn: item.expected_mpn.clone(),
        extracted_mpn: String::new(),
        match_status: MatchStatus::Error,
        url_classification: UrlClassification::Error,
        matching_type: MatchingType::Error,
        details: message.to_string(),
        candidate_list: String::new(),
        screenshot_paths,
    }
}
