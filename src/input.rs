//! 入力の読み込み
//!
//! 報告書テキスト・候補リスト・正規化結果をファイルまたは引数から読み込み、
//! 空入力などはここで弾く。

use crate::error::{LabSummaryError, Result};
use lab_summary_common::{NormalizedTest, ProvenanceEntry};
use serde::Deserialize;
use std::path::Path;

/// 報告書テキストを取得（`--data` 優先、なければファイル）
pub fn read_report_text(data: Option<&str>, file: Option<&Path>) -> Result<String> {
    let text = match (data, file) {
        (Some(data), _) => data.to_string(),
        (None, Some(path)) => read_file(path)?,
        (None, None) => {
            return Err(LabSummaryError::InvalidInput(
                "--data または --file で報告書テキストを指定してください".into(),
            ))
        }
    };

    if text.trim().is_empty() {
        return Err(LabSummaryError::InvalidInput("報告書テキストが空です".into()));
    }
    Ok(text)
}

/// 候補リストのJSON表現
#[derive(Deserialize)]
#[serde(untagged)]
enum CandidatesJson {
    List(Vec<String>),
    Wrapped { tests_raw: Vec<String> },
}

/// 候補リストを読み込む（配列 or `{"tests_raw": [...]}`）
pub fn parse_candidates(json: &str) -> Result<Vec<String>> {
    let parsed: CandidatesJson = serde_json::from_str(json)?;
    let candidates = match parsed {
        CandidatesJson::List(list) => list,
        CandidatesJson::Wrapped { tests_raw } => tests_raw,
    };

    if candidates.is_empty() {
        return Err(LabSummaryError::InvalidInput(
            "tests_raw は空でない文字列配列である必要があります".into(),
        ));
    }
    Ok(candidates)
}

/// ガード対象の入力（正規化ステージの出力）
#[derive(Debug, Deserialize)]
pub struct GuardInput {
    pub tests: Vec<NormalizedTest>,
    #[serde(default)]
    pub provenance: Option<Vec<ProvenanceEntry>>,
}

impl GuardInput {
    /// 許可リスト（出所があればそれを優先）
    pub fn allowed_names(&self) -> Vec<String> {
        match &self.provenance {
            Some(provenance) => provenance.iter().map(|p| p.name.clone()).collect(),
            None => self.tests.iter().map(|t| t.name.clone()).collect(),
        }
    }
}

pub fn parse_guard_input(json: &str) -> Result<GuardInput> {
    Ok(serde_json::from_str(json)?)
}

pub fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(LabSummaryError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}
