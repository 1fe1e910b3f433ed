//! バッチ処理の統合テスト
//!
//! ページ取得とカタログをテスト用実装に差し替えて、
//! レコード数・順序・区分を検証する

use async_trait::async_trait;
use mpn_verify::batch::BatchRunner;
use mpn_verify::catalog::{CatalogSearch, RecordingSleeper, RetryPolicy, Verifier};
use mpn_verify::common::{
    BatchItem, CatalogRecord, ExtractionResult, MatchStatus, MatchingType, UrlClassification,
};
use mpn_verify::error::{Result, VerifyError};
use mpn_verify::page::{CaptureTargets, HttpPageInspector, PageCapture, PageInspector};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// URLごとの応答を返すページ取得
#[derive(Default)]
struct FakeInspector {
    pages: HashMap<String, PageBehavior>,
}

enum PageBehavior {
    Marker(Option<&'static str>, Option<&'static str>),
    Fail(&'static str),
    /// 操作前の成果物を書いてから失敗する
    FailAfterCapture(&'static str),
    Hang,
}

impl FakeInspector {
    fn page(mut self, url: &str, behavior: PageBehavior) -> Self {
        self.pages.insert(url.to_string(), behavior);
        self
    }
}

#[async_trait]
impl PageInspector for FakeInspector {
    async fn inspect(&self, url: &str, targets: &CaptureTargets) -> Result<PageCapture> {
        match self.pages.get(url) {
            Some(PageBehavior::Marker(mpn, language)) => Ok(PageCapture {
                extraction: ExtractionResult {
                    mpn: mpn.map(str::to_string),
                    language: language.map(str::to_string),
                },
                artifacts: vec![targets.path("initial", "png"), targets.path("final", "png")],
            }),
            Some(PageBehavior::Fail(message)) => Err(VerifyError::Navigation(message.to_string())),
            Some(PageBehavior::FailAfterCapture(message)) => {
                tokio::fs::write(targets.path("initial", "png"), b"png").await?;
                Err(VerifyError::Navigation(message.to_string()))
            }
            Some(PageBehavior::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                unreachable!()
            }
            None => Err(VerifyError::Navigation(format!("unknown url {}", url))),
        }
    }
}

/// MPNごとに固定のレコードを返すカタログ
#[derive(Default)]
struct FakeCatalog {
    records: HashMap<String, Vec<&'static str>>,
    failing: bool,
    calls: AtomicUsize,
}

#[async_trait]
impl CatalogSearch for FakeCatalog {
    async fn search(&self, mpn: &str, _language_code: &str) -> Result<Vec<CatalogRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(VerifyError::ApiStatus {
                status: 500,
                reason: "Internal Server Error".into(),
            });
        }
        Ok(self
            .records
            .get(mpn)
            .map(|mpns| mpns.iter().map(|m| CatalogRecord::with_mpn(*m)).collect())
            .unwrap_or_default())
    }
}

fn verifier(catalog: FakeCatalog) -> Verifier<FakeCatalog, RecordingSleeper> {
    Verifier::with_sleeper(catalog, RetryPolicy::default(), RecordingSleeper::default())
}

#[tokio::test]
async fn test_one_record_per_item_in_order() {
    let dir = tempdir().expect("Failed to create temp dir");

    let inspector = FakeInspector::default()
        .page("https://a", PageBehavior::Marker(Some("ABC-123"), Some("en-GB")))
        .page("https://b", PageBehavior::Fail("net::ERR_NAME_NOT_RESOLVED"))
        .page("https://c", PageBehavior::Marker(None, Some("de")))
        .page("https://d", PageBehavior::Marker(Some("XYZ_999"), None));

    let catalog = FakeCatalog {
        records: HashMap::from([
            ("ABC-123".to_string(), vec!["abc123"]),
            ("XYZ_999".to_string(), vec!["QRS-000"]),
        ]),
        ..Default::default()
    };
    let verifier = verifier(catalog);

    let items = vec![
        BatchItem::new("https://a", "ABC123"),
        BatchItem::new("https://b", "B-1"),
        BatchItem::new("https://c", "C-1"),
        BatchItem::new("https://d", "D-1"),
        BatchItem::new("https://unknown", ""),
    ];

    let runner = BatchRunner::new(&inspector, &verifier, dir.path(), Duration::from_secs(5));
    let results = runner.run(&items).await;

    assert_eq!(results.len(), items.len());
    let urls: Vec<&str> = results.records().iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, vec!["https://a", "https://b", "https://c", "https://d", "https://unknown"]);

    let records = results.records();

    // シナリオA
    assert_eq!(records[0].matching_type, MatchingType::Hit);
    assert_eq!(records[0].match_status, MatchStatus::Matched);
    assert_eq!(records[0].url_classification, UrlClassification::Product);
    assert_eq!(records[0].candidate_list, "abc123");
    assert_eq!(records[0].language, "en-GB");
    assert_eq!(records[0].screenshot_paths.len(), 2);
    assert!(records[0].screenshot_paths[0].ends_with("initial_1.png"));

    // ページ取得失敗
    assert_eq!(records[1].matching_type, MatchingType::Error);
    assert_eq!(records[1].url_classification, UrlClassification::Error);
    assert!(records[1].details.contains("ERR_NAME_NOT_RESOLVED"));

    // シナリオC
    assert_eq!(records[2].matching_type, MatchingType::NoMpnFound);
    assert_eq!(records[2].candidate_list, "");
    assert_eq!(records[2].url_classification, UrlClassification::CategoryGeneral);

    // シナリオB
    assert_eq!(records[3].matching_type, MatchingType::Miss);
    assert_eq!(records[3].details, "No match found with similarity >= 70%");
    assert_eq!(records[3].match_status, MatchStatus::Unmatched);

    assert_eq!(records[4].matching_type, MatchingType::Error);

    let summary = results.summary();
    assert_eq!(summary.total, 5);
    assert_eq!(summary.hits, 1);
    assert_eq!(summary.misses, 1);
    assert_eq!(summary.no_mpn_found, 1);
    assert_eq!(summary.errors, 2);
}

/// シナリオC: マーカーなしではカタログを呼ばない
#[tokio::test]
async fn test_no_marker_skips_catalog() {
    let dir = tempdir().expect("Failed to create temp dir");
    let inspector = FakeInspector::default().page("https://c", PageBehavior::Marker(Some("  "), None));
    let verifier = verifier(FakeCatalog::default());

    let runner = BatchRunner::new(&inspector, &verifier, dir.path(), Duration::from_secs(5));
    let results = runner.run(&[BatchItem::new("https://c", "X")]).await;

    assert_eq!(results.records()[0].matching_type, MatchingType::NoMpnFound);
    assert_eq!(results.records()[0].details, "No MPN is found");
}

/// シナリオD: カタログ障害はErrorレコードになり後続は続行
#[tokio::test]
async fn test_catalog_failure_becomes_error_record() {
    let dir = tempdir().expect("Failed to create temp dir");
    let inspector = FakeInspector::default()
        .page("https://a", PageBehavior::Marker(Some("A-1"), None))
        .page("https://b", PageBehavior::Marker(None, None));
    let catalog = FakeCatalog {
        failing: true,
        ..Default::default()
    };
    let verifier = verifier(catalog);

    let runner = BatchRunner::new(&inspector, &verifier, dir.path(), Duration::from_secs(5));
    let results = runner
        .run(&[BatchItem::new("https://a", "A-1"), BatchItem::new("https://b", "")])
        .await;

    let records = results.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].matching_type, MatchingType::Error);
    assert_eq!(records[0].details, "API request failed: 500 - Internal Server Error");
    // MPN自体は期待値と一致している
    assert_eq!(records[0].match_status, MatchStatus::Matched);
    assert_eq!(records[1].matching_type, MatchingType::NoMpnFound);
}

#[tokio::test(start_paused = true)]
async fn test_navigation_timeout_only_affects_item() {
    let dir = tempdir().expect("Failed to create temp dir");
    let inspector = FakeInspector::default()
        .page("https://slow", PageBehavior::Hang)
        .page("https://ok", PageBehavior::Marker(None, None));
    let verifier = verifier(FakeCatalog::default());

    let runner = BatchRunner::new(&inspector, &verifier, dir.path(), Duration::from_secs(60));
    let results = runner
        .run(&[BatchItem::new("https://slow", ""), BatchItem::new("https://ok", "")])
        .await;

    let records = results.records();
    assert_eq!(records[0].matching_type, MatchingType::Error);
    assert_eq!(records[0].details, "Navigation timeout of 60000ms exceeded");
    assert_eq!(records[1].matching_type, MatchingType::NoMpnFound);
}

/// URLが空の行もErrorレコードになり、件数は入力行数と一致する
#[tokio::test]
async fn test_blank_url_row_gets_error_record() {
    let dir = tempdir().expect("Failed to create temp dir");
    let inspector = FakeInspector::default()
        .page("https://a", PageBehavior::Marker(None, None))
        .page("https://b", PageBehavior::Marker(None, None));
    let catalog = FakeCatalog::default();
    let verifier = verifier(catalog);

    let items = vec![
        BatchItem::new("https://a", "A-1"),
        BatchItem::new("", "ORPHAN"),
        BatchItem::new("https://b", "B-1"),
    ];
    let runner = BatchRunner::new(&inspector, &verifier, dir.path(), Duration::from_secs(5));
    let results = runner.run(&items).await;

    let records = results.records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[1].url, "");
    assert_eq!(records[1].expected_mpn, "ORPHAN");
    assert_eq!(records[1].matching_type, MatchingType::Error);
    assert_eq!(records[1].match_status, MatchStatus::Error);
    assert_eq!(records[1].url_classification, UrlClassification::Error);
    assert_eq!(records[1].details, "URL is empty");
    assert!(records[1].screenshot_paths.is_empty());
    assert_eq!(records[2].matching_type, MatchingType::NoMpnFound);
    assert_eq!(verifier.sleeper().calls().len(), 0);
}

/// 失敗前に書かれた成果物はErrorレコードに残る
#[tokio::test]
async fn test_failure_keeps_written_artifacts() {
    let dir = tempdir().expect("Failed to create temp dir");
    let inspector = FakeInspector::default()
        .page("https://a", PageBehavior::FailAfterCapture("net::ERR_CONNECTION_RESET"));
    let verifier = verifier(FakeCatalog::default());

    let runner = BatchRunner::new(&inspector, &verifier, dir.path(), Duration::from_secs(5));
    let results = runner.run(&[BatchItem::new("https://a", "A-1")]).await;

    let record = &results.records()[0];
    assert_eq!(record.matching_type, MatchingType::Error);
    assert_eq!(record.screenshot_paths.len(), 1);
    assert!(record.screenshot_paths[0].ends_with("initial_1.png"));
    assert_eq!(record.final_artifact(), None);
}

#[tokio::test]
async fn test_empty_input() {
    let dir = tempdir().expect("Failed to create temp dir");
    let inspector = FakeInspector::default();
    let verifier = verifier(FakeCatalog::default());

    let runner = BatchRunner::new(&inspector, &verifier, dir.path(), Duration::from_secs(5));
    let results = runner.run(&[]).await;
    assert!(results.is_empty());
}

/// HTTPページ取得 → マーカー抽出 → 照合の通し
#[tokio::test]
async fn test_http_inspector_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/product"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html lang="en-GB"><head><script src="x.js" data-flix-mpn="ABC-123"></script></head></html>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempdir().expect("Failed to create temp dir");
    let inspector = HttpPageInspector::new(Duration::from_secs(5)).unwrap();
    let catalog = FakeCatalog {
        records: HashMap::from([("ABC-123".to_string(), vec!["abc123"])]),
        ..Default::default()
    };
    let verifier = verifier(catalog);

    let items = vec![
        BatchItem::new(format!("{}/product", server.uri()), "abc-123"),
        BatchItem::new(format!("{}/missing", server.uri()), "x"),
    ];
    let runner = BatchRunner::new(&inspector, &verifier, dir.path(), Duration::from_secs(10));
    let results = runner.run(&items).await;

    let records = results.records();
    assert_eq!(records[0].matching_type, MatchingType::Hit);
    assert_eq!(records[0].language, "en-GB");
    assert_eq!(records[0].screenshot_paths.len(), 1);
    assert!(dir.path().join("page_1.html").exists());

    assert_eq!(records[1].matching_type, MatchingType::Error);
    assert!(records[1].details.contains("404"));
}
