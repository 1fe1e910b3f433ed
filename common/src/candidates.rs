//! 候補展開とカタログ照合
//!
//! 1レコードのMPN欄はカンマ区切りで複数の同等MPNを持つことがあるため、
//! 照合前にトークン列へ展開する。

use crate::normalizer::normalize_mpn;
use crate::types::{CatalogRecord, MpnCandidate, SimilarityOutcome, VerificationResult};
use tracing::debug;

pub const REASON_NO_API_MATCHES: &str = "No matches found in API";
pub const REASON_BELOW_THRESHOLD: &str = "No match found with similarity >= 70%";

/// レコード列を候補トークン列に展開する（API返却順を維持）
///
/// 空・未設定のMPN欄と空トークンはスキップする。
pub fn expand_candidates(records: &[CatalogRecord]) -> Vec<MpnCandidate> {
    records
        .iter()
        .enumerate()
        .filter_map(|(idx, record)| record.mpn.as_deref().map(|mpn| (idx, mpn)))
        .flat_map(|(idx, mpn)| {
            mpn.split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(move |token| MpnCandidate {
                    token: token.to_string(),
                    record_index: idx,
                })
        })
        .collect()
}

/// レポート表示用の全候補MPN（レコード単位）
pub fn record_mpns(records: &[CatalogRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.mpn.as_deref())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

/// クエリMPNとカタログレコードを照合する
///
/// 最初に閾値を満たしたトークンでHitを返す。
/// Missの類似度は全トークン中の最大値。
pub fn match_candidates(query_mpn: &str, records: &[CatalogRecord]) -> VerificationResult {
    if records.is_empty() {
        return VerificationResult::miss(REASON_NO_API_MATCHES, None, Vec::new());
    }

    let all_candidates = record_mpns(records);
    let normalized_query = normalize_mpn(query_mpn);
    let mut best: Option<f64> = None;

    for candidate in expand_candidates(records) {
        let outcome = SimilarityOutcome::evaluate(
            &normalized_query,
            &candidate.token,
            &normalize_mpn(&candidate.token),
        );
        debug!(
            query = %normalized_query,
            candidate = %candidate.token,
            record = candidate.record_index,
            score = outcome.score,
            accepted = outcome.accepted,
            "類似度比較"
        );

        if outcome.accepted {
            return VerificationResult::hit(&outcome.candidate, outcome.score, all_candidates);
        }

        best = Some(best.map_or(outcome.score, |b| b.max(outcome.score)));
    }

    VerificationResult::miss(REASON_BELOW_THRESHOLD, best, all_candidates)
}
