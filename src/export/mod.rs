pub mod excel;
pub mod html;

use crate::error::Result;
use mpn_verify_common::BatchResults;
use std::path::Path;
use tracing::info;

/// バッチ結果をExcelとHTMLレポートに出力する
///
/// HTMLはレコードが1件以上ある場合のみ生成する。
pub fn export_results(
    results: &BatchResults,
    excel_path: &Path,
    report_path: &Path,
) -> Result<()> {
    println!("- Excelを生成中...");
    excel::write_results(results.records(), excel_path)?;
    info!(path = %excel_path.display(), rows = results.len(), "Excel出力");
    println!("✔ Excel出力: {}", excel_path.display());

    if results.is_empty() {
        println!("- 結果が0件のためHTMLレポートは省略");
        return Ok(());
    }

    println!("- HTMLレポートを生成中...");
    html::write_report(results.records(), report_path)?;
    info!(path = %report_path.display(), "HTMLレポート出力");
    println!("✔ HTMLレポート: {}", report_path.display());

    Ok(())
}
