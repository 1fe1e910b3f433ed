//! HTMLからFlixマーカーを抽出する
//!
//! `<script data-flix-mpn="..." data-flix-language="...">` を探す。

use mpn_verify_common::ExtractionResult;
use regex::Regex;

/// scriptタグ1つ分のマーカー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlixMarker {
    pub mpn: String,
    pub language: Option<String>,
}

lazy_static::lazy_static! {
    static ref SCRIPT_TAG_RE: Regex = Regex::new(r"(?is)<script\b[^>]*>").unwrap();
    static ref MPN_ATTR_RE: Regex =
        Regex::new(r#"(?is)\sdata-flix-mpn\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap();
    static ref LANGUAGE_ATTR_RE: Regex =
        Regex::new(r#"(?is)\sdata-flix-language\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap();
    static ref HTML_LANG_RE: Regex =
        Regex::new(r#"(?is)<html\b[^>]*\slang\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap();
}

/// 属性値（ダブル/シングルクォート）を取り出す
fn attr_value(re: &Regex, haystack: &str) -> Option<String> {
    re.captures(haystack)
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| decode_entities(m.as_str()))
}

/// 属性値でよく使われる実体参照のみデコード
fn decode_entities(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// `data-flix-mpn` を持つscriptタグを文書順に列挙
pub fn find_markers(html: &str) -> Vec<FlixMarker> {
    SCRIPT_TAG_RE
        .find_iter(html)
        .filter_map(|tag| {
            let tag = tag.as_str();
            let mpn = attr_value(&MPN_ATTR_RE, tag)?;
            let language = attr_value(&LANGUAGE_ATTR_RE, tag).filter(|l| !l.trim().is_empty());
            Some(FlixMarker { mpn, language })
        })
        .collect()
}

/// `<html lang>` の値
pub fn page_language(html: &str) -> Option<String> {
    attr_value(&HTML_LANG_RE, html).filter(|l| !l.trim().is_empty())
}

/// 先頭マーカーのMPNと言語（マーカー → html lang の順）を返す
pub fn extract(html: &str) -> ExtractionResult {
    let markers = find_markers(html);
    let first = markers.into_iter().next();

    let mpn = first
        .as_ref()
        .map(|m| m.mpn.trim().to_string())
        .filter(|m| !m.is_empty());
    let language = first
        .and_then(|m| m.language)
        .or_else(|| page_language(html));

    ExtractionResult { mpn, language }
}
