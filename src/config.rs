use crate::ai_provider::AiProvider;
use crate::error::{LabSummaryError, Result};
use lab_summary_common::{ExtractOptions, ReferenceCatalog};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 参照表パスを上書きする環境変数
pub const CATALOG_ENV: &str = "LAB_SUMMARY_CATALOG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ai_provider: AiProvider,
    pub model: Option<String>,
    pub timeout_seconds: u64,
    /// AI CLIの実行ファイル（未指定ならPATH上のプロバイダ名）
    pub ai_cli_path: Option<PathBuf>,
    /// 独自の参照表JSON（未指定なら組み込み）
    pub catalog_path: Option<PathBuf>,
    /// 3文字以上の英単語を必須にする
    pub strict_extraction: bool,
    /// `,` `;` でも行を分割する
    pub split_on_separators: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ai_provider: AiProvider::Claude,
            model: None,
            timeout_seconds: 120,
            ai_cli_path: None,
            catalog_path: None,
            strict_extraction: false,
            split_on_separators: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| LabSummaryError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("lab-summary").join("config.json"))
    }

    /// 有効な参照表パス（環境変数を優先）
    pub fn effective_catalog_path(&self) -> Option<PathBuf> {
        match std::env::var(CATALOG_ENV) {
            Ok(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
            _ => self.catalog_path.clone(),
        }
    }

    /// 参照表を構築
    pub fn load_catalog(&self) -> Result<ReferenceCatalog> {
        match self.effective_catalog_path() {
            Some(path) => {
                if !path.exists() {
                    return Err(LabSummaryError::FileNotFound(path.display().to_string()));
                }
                let catalog = ReferenceCatalog::from_file(&path)
                    .map_err(|e| LabSummaryError::Catalog(format!("{}: {}", path.display(), e)))?;
                tracing::info!(path = %path.display(), entries = catalog.len(), "参照表を読み込み");
                Ok(catalog)
            }
            None => Ok(ReferenceCatalog::builtin()),
        }
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            split_on_separators: self.split_on_separators,
            require_word: self.strict_extraction,
        }
    }

    pub fn set_catalog_path(&mut self, path: PathBuf) -> Result<()> {
        // 保存前に読み込めるか確認
        ReferenceCatalog::from_file(&path)
            .map_err(|e| LabSummaryError::Catalog(format!("{}: {}", path.display(), e)))?;
        self.catalog_path = Some(path);
        self.save()
    }

    pub fn set_ai_provider(&mut self, provider: AiProvider) -> Result<()> {
        self.ai_provider = provider;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.ai_provider, AiProvider::Claude);
        assert_eq!(config.timeout_seconds, 120);
        assert!(config.split_on_separators);
        assert!(!config.strict_extraction);
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.timeout_seconds, 120);
    }

    #[test]
    fn test_save_and_load_roundtrip_partial_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"ai_provider": "gemini", "strict_extraction": true}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.ai_provider, AiProvider::Gemini);
        assert!(config.strict_extraction);
        assert_eq!(config.timeout_seconds, 120);

        config.save_to(&path).unwrap();
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.ai_provider, AiProvider::Gemini);
    }

    #[test]
    fn test_extract_options() {
        let config = Config {
            strict_extraction: true,
            split_on_separators: false,
            ..Default::default()
        };
        let options = config.extract_options();
        assert!(options.require_word);
        assert!(!options.split_on_separators);
    }

    #[test]
    fn test_load_catalog_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, r#"{"WBC": {"unit": "/uL", "low": 4000, "high": 10000}}"#).unwrap();

        let config = Config {
            catalog_path: Some(path),
            ..Default::default()
        };
        // 環境変数が設定されている環境ではスキップ
        if std::env::var(CATALOG_ENV).is_ok() {
            return;
        }
        let catalog = config.load_catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("WBC").unwrap().high, 10000.0);
    }

    #[test]
    fn test_load_catalog_missing_file() {
        if std::env::var(CATALOG_ENV).is_ok() {
            return;
        }
        let config = Config {
            catalog_path: Some(PathBuf::from("/nonexistent/catalog-12345.json")),
            ..Default::default()
        };
        let err = config.load_catalog().unwrap_err();
        assert!(matches!(err, LabSummaryError::FileNotFound(_)));
    }
}
