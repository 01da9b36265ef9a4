//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// コア処理（抽出・正規化・ガード）はエラーを返さない。
/// ファイル読み込みや参照表・AIレスポンスの解析など、境界の処理でのみ使う。
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "catalog.json missing");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("catalog.json missing"));
    }

    #[test]
    fn test_error_display_config() {
        let error = Error::Config("Hemoglobin: low exceeds high".to_string());
        assert_eq!(
            format!("{}", error),
            "Config error: Hemoglobin: low exceeds high"
        );
    }

    #[test]
    fn test_error_display_parse() {
        let error = Error::Parse("no JSON object in response".to_string());
        assert_eq!(format!("{}", error), "Parse error: no JSON object in response");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }
}
