//! MPN・言語コードの正規化
//!
//! 比較の両辺（クエリMPNとカタログMPN）に同じ正規化をかけること。

/// 比較時に無視する文字（`_` 空白 `/` `\` `-` `.` `#`）
fn is_noise(c: char) -> bool {
    c.is_whitespace() || matches!(c, '_' | '/' | '\\' | '-' | '.' | '#')
}

/// MPNを比較用に正規化する
///
/// 記号・空白を除去して小文字化する。
pub fn normalize_mpn(mpn: &str) -> String {
    mpn.chars()
        .filter(|&c| !is_noise(c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// 言語コードが取れない場合の既定値
pub const DEFAULT_LANGUAGE_CODE: &str = "us";

/// 言語コードを2文字の小文字コードに正規化する
///
/// `en-GB` → `en`、`DE` → `de`。空・不正な値は `us`。
pub fn normalize_language_code(language: Option<&str>) -> String {
    let Some(raw) = language.map(str::trim).filter(|l| !l.is_empty()) else {
        return DEFAULT_LANGUAGE_CODE.to_string();
    };

    let code: String = raw
        .to_lowercase()
        .replacen('-', "", 1)
        .chars()
        .take(2)
        .collect();

    if code.chars().count() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        code
    } else {
        DEFAULT_LANGUAGE_CODE.to_string()
    }
}
