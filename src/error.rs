use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabSummaryError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("入力が不正です: {0}")]
    InvalidInput(String),

    #[error("参照表の読み込みに失敗: {0}")]
    Catalog(String),

    #[error("AI CLI実行エラー: {0}")]
    CliExecution(String),

    #[error("AI CLIがタイムアウトしました（{0}秒）")]
    Timeout(u64),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] lab_summary_common::Error),
}

pub type Result<T> = std::result::Result<T, LabSummaryError>;
