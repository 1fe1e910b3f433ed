//! 入力スプレッドシートの読み込み
//!
//! ヘッダ行の `URL` と `ExcelMPN` 列からバッチ項目を作る。

use crate::error::{Result, VerifyError};
use calamine::{open_workbook_auto, Data, Reader};
use mpn_verify_common::BatchItem;
use std::path::Path;
use tracing::warn;

pub const URL_COLUMN: &str = "URL";
pub const MPN_COLUMN: &str = "ExcelMPN";

/// セルを文字列化（数値MPNもそのまま文字列に）
fn cell_text(cell: Option<&Data>) -> String {
    match cell {
        None | Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.trim().to_string(),
        Some(Data::Float(f)) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Some(other) => other.to_string().trim().to_string(),
    }
}

fn find_column(header: &[Data], name: &str) -> Option<usize> {
    header
        .iter()
        .position(|cell| cell_text(Some(cell)).eq_ignore_ascii_case(name))
}

/// シートを読み込んでバッチ項目を返す（行順）
pub fn read_batch_items(path: &Path, sheet: &str) -> Result<Vec<BatchItem>> {
    if !path.exists() {
        return Err(VerifyError::FileNotFound(path.display().to_string()));
    }

    let mut workbook = open_workbook_auto(path)?;
    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(VerifyError::InputSheet(format!("シート '{}' がありません", sheet)));
    }
    let range = workbook.worksheet_range(sheet)?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| VerifyError::InputSheet(format!("シート '{}' が空です", sheet)))?;

    let url_col = find_column(header, URL_COLUMN)
        .ok_or_else(|| VerifyError::InputSheet(format!("'{}' 列がありません", URL_COLUMN)))?;
    let mpn_col = find_column(header, MPN_COLUMN);
    if mpn_col.is_none() {
        warn!("'{}' 列がないため期待MPNは空として扱います", MPN_COLUMN);
    }

    let mut items = Vec::new();
    for (idx, row) in rows.enumerate() {
        let url = cell_text(row.get(url_col));
        if url.is_empty() {
            // ヘッダを1行目として数える
            warn!(row = idx + 2, "URLが空の行です（Errorとして記録されます）");
        }
        let expected_mpn = mpn_col.map(|c| cell_text(row.get(c))).unwrap_or_default();
        items.push(BatchItem::new(url, expected_mpn));
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(None), "");
        assert_eq!(cell_text(Some(&Data::Empty)), "");
        assert_eq!(cell_text(Some(&Data::String(" AB-1 ".into()))), "AB-1");
        assert_eq!(cell_text(Some(&Data::Float(12345.0))), "12345");
        assert_eq!(cell_text(Some(&Data::Int(77))), "77");
    }

    #[test]
    fn test_find_column_case_insensitive() {
        let header = vec![
            Data::String("url".into()),
            Data::String(" excelmpn ".into()),
        ];
        assert_eq!(find_column(&header, URL_COLUMN), Some(0));
        assert_eq!(find_column(&header, MPN_COLUMN), Some(1));
        assert_eq!(find_column(&header, "Other"), None);
    }
}
