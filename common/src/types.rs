//! 検査結果の型定義
//!
//! CLIとライブラリ利用側で共有される型:
//! - ExtractionOutput: 抽出ステージの出力
//! - NormalizedTest / ProvenanceEntry: 正規化ステージの出力
//! - Unprocessed: パイプラインを止める「未処理」シグナル
//! - ProcessReport: 全ステージ完了時の最終出力

use serde::{Deserialize, Serialize};
use std::fmt;

/// 正規化の信頼度（1件以上のレコードが得られた場合）
pub const NORMALIZATION_CONFIDENCE: f64 = 0.84;

/// ハルシネーション検出時の理由
pub const REASON_HALLUCINATED: &str = "hallucinated tests not present in input";
/// 入力に認識可能な検査項目がない場合の理由
pub const REASON_NO_RECOGNIZABLE: &str = "no recognizable tests in input";
/// 要約対象の検査項目がない場合の理由
pub const REASON_NO_TESTS: &str = "no tests provided";
/// AI応答の形式不正
pub const REASON_SUMMARY_MALFORMED: &str = "AI summary malformed";
/// AI呼び出しの失敗
pub const REASON_SUMMARY_FAILED: &str = "AI summary failed";

/// 判定ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Low,
    Normal,
    High,
    /// 明示マーカーからのみ設定される
    Borderline,
}

impl TestStatus {
    /// 報告書中のステータス語を解釈（low / high / borderline のみ）
    pub fn from_word(word: &str) -> Option<Self> {
        match word.trim().to_lowercase().as_str() {
            "low" => Some(TestStatus::Low),
            "high" => Some(TestStatus::High),
            "borderline" => Some(TestStatus::Borderline),
            _ => None,
        }
    }

    /// 括弧付きマーカー表記（例: "(Low)"）
    pub fn marker(&self) -> &'static str {
        match self {
            TestStatus::Low => "(Low)",
            TestStatus::Normal => "(Normal)",
            TestStatus::High => "(High)",
            TestStatus::Borderline => "(Borderline)",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Low => write!(f, "low"),
            TestStatus::Normal => write!(f, "normal"),
            TestStatus::High => write!(f, "high"),
            TestStatus::Borderline => write!(f, "borderline"),
        }
    }
}

/// 基準範囲
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefRange {
    pub low: f64,
    pub high: f64,
}

impl RefRange {
    /// 数値から判定する（borderlineは返さない）
    pub fn classify(&self, value: f64) -> TestStatus {
        if value < self.low {
            TestStatus::Low
        } else if value > self.high {
            TestStatus::High
        } else {
            TestStatus::Normal
        }
    }
}

/// 抽出ステージの出力
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionOutput {
    pub tests_raw: Vec<String>,
    pub confidence: f64,
}

/// 正規化済みの検査結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTest {
    /// 参照表の正式名
    pub name: String,
    pub value: f64,
    /// 参照表からコピーした単位
    pub unit: String,
    pub status: TestStatus,
    pub ref_range: RefRange,
}

/// 正規化レコードと元セグメントの対応
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceEntry {
    pub raw: String,
    pub name: String,
}

/// セグメントを捨てた理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// エイリアスに一致しない
    NoCanonicalName,
    /// 正式名が参照表にない
    NotInCatalog,
    /// 数値が見つからない
    NoNumericValue,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NoCanonicalName => write!(f, "no canonical name"),
            RejectReason::NotInCatalog => write!(f, "not in reference catalog"),
            RejectReason::NoNumericValue => write!(f, "no numeric value"),
        }
    }
}

/// 正規化で捨てられたセグメント（診断用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedSegment {
    pub raw: String,
    pub reason: RejectReason,
}

/// 正規化ステージの出力
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizationOutput {
    pub tests: Vec<NormalizedTest>,
    pub normalization_confidence: f64,
    pub provenance: Vec<ProvenanceEntry>,

    /// JSON契約には含めない
    #[serde(skip)]
    pub rejected: Vec<RejectedSegment>,
}

impl NormalizationOutput {
    /// 出所の名前リスト（ガードの許可リストに使う）
    pub fn provenance_names(&self) -> Vec<String> {
        self.provenance.iter().map(|p| p.name.clone()).collect()
    }
}

/// パイプライン全体のステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessStatus {
    Ok,
    Unprocessed,
}

/// 「未処理」シグナル
///
/// 例外ではなく、パイプラインを正常に停止させるための結果値。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unprocessed {
    pub status: ProcessStatus,
    pub reason: String,
}

impl Unprocessed {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            status: ProcessStatus::Unprocessed,
            reason: reason.into(),
        }
    }
}

/// AIが返す要約
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub explanations: Vec<String>,
    /// 要約で言及した検査名（ガード対象）
    #[serde(default)]
    pub tests: Vec<String>,
}

/// 各ステージの信頼度
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessMeta {
    pub extraction_confidence: f64,
    pub normalization_confidence: f64,
}

/// パイプラインの最終出力
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessReport {
    pub tests: Vec<NormalizedTest>,
    pub summary: String,
    pub explanations: Vec<String>,
    pub status: ProcessStatus,
    pub meta: ProcessMeta,
}

/// パイプラインの結果（完了 or 未処理）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProcessOutcome {
    Completed(ProcessReport),
    Unprocessed(Unprocessed),
}

impl ProcessOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ProcessOutcome::Completed(_))
    }
}

impl From<Unprocessed> for ProcessOutcome {
    fn from(value: Unprocessed) -> Self {
        ProcessOutcome::Unprocessed(value)
    }
}
