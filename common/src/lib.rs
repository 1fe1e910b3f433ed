//! MPN Verify Common Library
//!
//! 正規化・類似度・照合・区分判定の純粋ロジックと共有型

pub mod types;
pub mod normalizer;
pub mod similarity;
pub mod candidates;
pub mod classifier;
pub mod batch;

pub use types::{
    BatchItem, CatalogRecord, ExtractionResult, MatchStatus, MatchingType, MpnCandidate,
    ResultRecord, SimilarityOutcome, UrlClassification, VerificationResult, VerificationStatus,
};
pub use normalizer::{normalize_language_code, normalize_mpn, DEFAULT_LANGUAGE_CODE};
pub use similarity::{is_accepted, score, ACCEPTANCE_THRESHOLD};
pub use candidates::{expand_candidates, match_candidates, record_mpns};
pub use classifier::{classify, classify_failure, match_status};
pub use batch::{BatchResults, BatchSummary};
