//! mpn-verify
//!
//! 商品ページに埋め込まれたMPNマーカーを抽出し、カタログ検索APIの
//! 候補と類似度で照合してURLごとに Hit / Miss / Error / No MPN Found を判定する。

pub mod batch;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod page;

pub use mpn_verify_common as common;
