//! バッチ結果と集計

use crate::types::{MatchingType, ResultRecord};
use serde::Serialize;

/// 1回の実行で得たレコード列（入力順）
///
/// 追記のみ。出力側へはスライスとして渡す。
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct BatchResults {
    records: Vec<ResultRecord>,
}

impl BatchResults {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, record: ResultRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary::from_records(&self.records)
    }
}

/// 区分ごとの件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub hits: usize,
    pub misses: usize,
    pub errors: usize,
    pub no_mpn_found: usize,
}

impl BatchSummary {
    pub fn from_records(records: &[ResultRecord]) -> Self {
        records.iter().fold(
            Self {
                total: records.len(),
                ..Default::default()
            },
            |mut acc, r| {
                match r.matching_type {
                    MatchingType::Hit => acc.hits += 1,
                    MatchingType::Miss => acc.misses += 1,
                    MatchingType::Error => acc.errors += 1,
                    MatchingType::NoMpnFound => acc.no_mpn_found += 1,
                }
                acc
            },
        )
    }

    pub fn count(&self, matching_type: MatchingType) -> usize {
        match matching_type {
            MatchingType::Hit => self.hits,
            MatchingType::Miss => self.misses,
            MatchingType::Error => self.errors,
            MatchingType::NoMpnFound => self.no_mpn_found,
        }
    }
}
