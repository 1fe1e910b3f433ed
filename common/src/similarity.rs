//! MPN類似度スコア
//!
//! バイグラム重複（Dice係数）を0〜100のパーセントで返す。
//! 入力は正規化済みであること（正規化は呼び出し側で行う）。

use crate::types::SimilarityOutcome;
use std::collections::HashMap;

/// 採用閾値（%）
pub const ACCEPTANCE_THRESHOLD: f64 = 70.0;

/// 2つの正規化済み文字列の類似度（0〜100）
pub fn score(a: &str, b: &str) -> f64 {
    if a == b {
        return 100.0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    if a_chars.len() < 2 || b_chars.len() < 2 {
        return 0.0;
    }

    let mut a_bigrams: HashMap<(char, char), usize> = HashMap::new();
    for pair in a_chars.windows(2) {
        *a_bigrams.entry((pair[0], pair[1])).or_insert(0) += 1;
    }

    let mut intersection = 0usize;
    for pair in b_chars.windows(2) {
        if let Some(count) = a_bigrams.get_mut(&(pair[0], pair[1])) {
            if *count > 0 {
                *count -= 1;
                intersection += 1;
            }
        }
    }

    let total = (a_chars.len() - 1) + (b_chars.len() - 1);
    (2.0 * intersection as f64 / total as f64) * 100.0
}

/// スコアが閾値以上か
pub fn is_accepted(score: f64) -> bool {
    score >= ACCEPTANCE_THRESHOLD
}

impl SimilarityOutcome {
    /// スコアを計算して判定結果を作る
    pub fn evaluate(normalized_query: &str, candidate: &str, normalized_candidate: &str) -> Self {
        let score = score(normalized_query, normalized_candidate);
        Self {
            candidate: candidate.to_string(),
            score,
            accepted: is_accepted(score),
        }
    }
}
