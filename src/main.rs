use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use mpn_verify::{batch, catalog, cli, config, error, export, input, page};
use catalog::{FlixCatalogClient, Verifier};
use cli::{Cli, Commands};
use config::Config;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_verifier(config: &Config) -> anyhow::Result<Verifier<FlixCatalogClient>> {
    let token = config.get_api_token()?;
    let client = FlixCatalogClient::new(config.api_base_url.clone(), token)
        .context("カタログクライアントの初期化に失敗")?;
    Ok(Verifier::new(client, config.retry_policy()))
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} {wide_msg}") {
        bar.set_style(style);
    }
    bar
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load().context("設定の読み込みに失敗")?;

    match cli.command {
        Commands::Run { input, output, report, artifacts, sheet } => {
            println!("🔎 mpn-verify - 一括検証\n");

            // 1. 入力読み込み
            println!("[1/3] 入力を読み込み中...");
            let sheet = sheet.unwrap_or_else(|| config.input_sheet.clone());
            let items = input::read_batch_items(&input, &sheet)
                .with_context(|| format!("{} の読み込みに失敗", input.display()))?;
            println!("✔ {}件のURLを検出\n", items.len());

            // 2. 検証
            println!("[2/3] ページ取得・カタログ照合中...");
            let verifier = build_verifier(&config)?;
            let inspector = page::HttpPageInspector::new(config.navigation_timeout())?;
            std::fs::create_dir_all(&artifacts)?;

            let runner = batch::BatchRunner::new(
                &inspector,
                &verifier,
                artifacts.clone(),
                config.navigation_timeout(),
            )
            .with_progress(progress_bar());

            let results = tokio::time::timeout(config.run_timeout(), runner.run(&items))
                .await
                .map_err(|_| error::VerifyError::RunTimeout(config.run_timeout_secs))?;
            println!("✔ 検証完了\n");

            // 3. 出力
            println!("[3/3] 結果を保存中...");
            export::export_results(&results, &output, &report)?;

            let summary = results.summary();
            println!(
                "\n✅ 完了: 全{}件 / Hit {} / Miss {} / No MPN Found {} / Error {}",
                summary.total, summary.hits, summary.misses, summary.no_mpn_found, summary.errors
            );
        }

        Commands::Verify { mpn, language } => {
            let mpn = mpn.trim();
            if mpn.is_empty() {
                anyhow::bail!("MPNが空です");
            }

            let verifier = build_verifier(&config)?;
            let result = verifier.verify(mpn, language.as_deref()).await;

            println!("結果: {}", result.status);
            println!("  詳細: {}", result.reason);
            if let Some(candidate) = &result.matched_candidate {
                println!("  一致MPN: {}", candidate);
            }
            if let Some(similarity) = result.similarity {
                println!("  類似度: {:.2}%", similarity);
            }
            if !result.all_candidates.is_empty() {
                println!("  候補: {}", result.all_candidates.join(", "));
            }
        }

        Commands::Config { set_api_token, show } => {
            let mut config = config;

            if let Some(token) = set_api_token {
                config.set_api_token(token)?;
                println!("✔ APIトークンを設定しました");
            }

            if show {
                println!("設定:");
                println!("  API URL: {}", config.api_base_url);
                println!("  最大試行回数: {}", config.max_attempts);
                println!("  バックオフ: {:?} ({}ms)", config.backoff, config.backoff_base_ms);
                println!("  ページ読み込みタイムアウト: {}秒", config.navigation_timeout_secs);
                println!("  全体タイムアウト: {}秒", config.run_timeout_secs);
                println!("  入力シート: {}", config.input_sheet);
                println!(
                    "  APIトークン: {}",
                    if config.get_api_token().is_ok() { "設定済み" } else { "未設定" }
                );
            }
        }
    }

    Ok(())
}
