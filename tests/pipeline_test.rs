//! 一括処理パイプラインの統合テスト
//!
//! 要約AIを差し替えて、ガードと未処理シグナルの流れを検証

use lab_summary_common::{ExtractOptions, ProcessOutcome, ReferenceCatalog};
use lab_summary_rust::error::{LabSummaryError, Result};
use lab_summary_rust::pipeline::process;
use lab_summary_rust::summarizer::SummaryBackend;

/// 固定応答のバックエンド
struct CannedBackend(&'static str);

impl SummaryBackend for CannedBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        assert!(prompt.contains("Mention ONLY the tests listed below."));
        Ok(self.0.to_string())
    }
}

/// 常に失敗するバックエンド
struct BrokenBackend;

impl SummaryBackend for BrokenBackend {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(LabSummaryError::Timeout(1))
    }
}

async fn run<B: SummaryBackend>(text: &str, backend: &B) -> serde_json::Value {
    let outcome = process(
        text,
        None,
        ReferenceCatalog::shared(),
        &ExtractOptions::default(),
        backend,
    )
    .await;
    serde_json::to_value(&outcome).unwrap()
}

#[tokio::test]
async fn test_report_shape() {
    let backend = CannedBackend(
        r#"```json
{"summary": "White cells are above range.", "explanations": ["WBC counts infection-fighting cells."], "tests": ["WBC"]}
```"#,
    );
    let json = run("WBC 15000 /uL\nName: John", &backend).await;

    assert_eq!(json["status"], "ok");
    assert_eq!(json["summary"], "White cells are above range.");
    assert_eq!(json["tests"][0]["name"], "WBC");
    assert_eq!(json["tests"][0]["status"], "high");
    assert_eq!(json["meta"]["extraction_confidence"], 0.8);
    assert_eq!(json["meta"]["normalization_confidence"], 0.84);
}

#[tokio::test]
async fn test_summary_naming_other_tests_is_rejected() {
    let backend = CannedBackend(
        r#"{"summary": "x", "explanations": [], "tests": ["WBC", "Hemoglobin"]}"#,
    );
    let json = run("WBC 15000 /uL", &backend).await;
    assert_eq!(
        json,
        serde_json::json!({"status": "unprocessed", "reason": "hallucinated tests not present in input"})
    );
}

#[tokio::test]
async fn test_backend_failure_is_unprocessed() {
    let json = run("WBC 15000 /uL", &BrokenBackend).await;
    assert_eq!(json["reason"], "AI summary failed");
}

#[tokio::test]
async fn test_no_tests_short_circuits() {
    let outcome = process(
        "Glucose 90 mg/dL",
        None,
        ReferenceCatalog::shared(),
        &ExtractOptions::default(),
        &BrokenBackend,
    )
    .await;
    assert!(!outcome.is_completed());
    assert_eq!(
        serde_json::to_value(&outcome).unwrap()["reason"],
        "no recognizable tests in input"
    );
}
