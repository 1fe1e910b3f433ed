//! 結果Excel出力

use crate::error::Result;
use mpn_verify_common::ResultRecord;
use rust_xlsxwriter::{Format, FormatBorder, Workbook};
use std::path::Path;

pub const RESULT_SHEET: &str = "Result";

/// 列見出しと列幅
const COLUMNS: &[(&str, f64)] = &[
    ("URL", 60.0),
    ("Language", 10.0),
    ("ExcelMPN", 18.0),
    ("MPN", 18.0),
    ("MatchStatus", 12.0),
    ("URLClassification", 18.0),
    ("MatchingType", 14.0),
    ("VerificationDetails", 40.0),
    ("FLIX360MPNs", 40.0),
    ("InitialScreenshot", 30.0),
    ("FinalScreenshot", 30.0),
];

fn row_values(record: &ResultRecord) -> [&str; 11] {
    [
        record.url.as_str(),
        record.language.as_str(),
        record.expected_mpn.as_str(),
        record.extracted_mpn.as_str(),
        record.match_status.as_str(),
        record.url_classification.as_str(),
        record.matching_type.as_str(),
        record.details.as_str(),
        record.candidate_list.as_str(),
        record.initial_artifact().unwrap_or(""),
        record.final_artifact().unwrap_or(""),
    ]
}

/// レコード1件につき1行のシートを書き出す
pub fn write_results(records: &[ResultRecord], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(RESULT_SHEET)?;

    let header_format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin);

    for (col, (title, width)) in COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *title, &header_format)?;
        worksheet.set_column_width(col, *width)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (idx, record) in records.iter().enumerate() {
        let row = idx as u32 + 1;
        for (col, value) in row_values(record).iter().enumerate() {
            // 空文字は空セルのまま
            if !value.is_empty() {
                worksheet.write_string(row, col as u16, *value)?;
            }
        }
    }

    workbook.save(output_path)?;
    Ok(())
}
