use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mpn-verify")]
#[command(about = "商品ページのMPNをカタログAPIで検証するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 入力Excelの全URLを検証してExcel/HTMLを出力
    Run {
        /// 入力Excelファイル（URL, ExcelMPN 列）
        #[arg(required = true)]
        input: PathBuf,

        /// 出力Excelファイル
        #[arg(short, long, default_value = "output.xlsx")]
        output: PathBuf,

        /// HTMLレポート
        #[arg(short, long, default_value = "test_results_report.html")]
        report: PathBuf,

        /// ページ成果物の保存先
        #[arg(short, long, default_value = "screenshots")]
        artifacts: PathBuf,

        /// 入力シート名（省略時は設定値）
        #[arg(long)]
        sheet: Option<String>,
    },

    /// MPNを1件だけカタログで検証
    Verify {
        /// 検証するMPN
        #[arg(required = true)]
        mpn: String,

        /// 言語コード（例: en-GB）
        #[arg(short, long)]
        language: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// APIトークンを設定
        #[arg(long)]
        set_api_token: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
