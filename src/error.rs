use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIトークンが設定されていません。`mpn-verify config --set-api-token YOUR_TOKEN` または FLIX360_API_TOKEN で設定してください")]
    MissingApiToken,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("入力シートが不正: {0}")]
    InputSheet(String),

    /// 非2xxレスポンス（リトライ対象）
    #[error("API request failed: {status} - {reason}")]
    ApiStatus { status: u16, reason: String },

    #[error("APIレスポンスのパースに失敗: {0}")]
    ApiParse(String),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ページ読み込みエラー: {0}")]
    Navigation(String),

    #[error("URL is empty")]
    EmptyUrl,

    #[error("Navigation timeout of {0}ms exceeded")]
    NavigationTimeout(u128),

    #[error("実行時間の上限（{0}秒）を超えました")]
    RunTimeout(u64),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel読み込みエラー: {0}")]
    ExcelRead(#[from] calamine::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, VerifyError>;
