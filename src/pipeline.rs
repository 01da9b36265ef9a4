//! 一括処理パイプライン
//!
//! 抽出 → 正規化 → ガード付き要約 → 最終レポート

use crate::summarizer::{generate_summary, SummaryBackend};
use lab_summary_common::confidence::round2;
use lab_summary_common::types::REASON_NO_RECOGNIZABLE;
use lab_summary_common::{
    extract_with_confidence, normalize, ExtractOptions, ProcessMeta, ProcessOutcome,
    ProcessReport, ProcessStatus, ReferenceCatalog, Unprocessed,
};

/// 報告書テキストを最後まで処理する
///
/// # Arguments
/// * `text` - OCR済み、またはプレーンな報告書テキスト
/// * `ocr_confidence` - OCR経由の場合のみエンジンの信頼度
/// * `catalog` - 参照表
/// * `options` - 抽出オプション
/// * `backend` - 要約AI
pub async fn process<B: SummaryBackend>(
    text: &str,
    ocr_confidence: Option<f64>,
    catalog: &ReferenceCatalog,
    options: &ExtractOptions,
    backend: &B,
) -> ProcessOutcome {
    // 1. 抽出
    let extraction = extract_with_confidence(text, options, ocr_confidence);
    tracing::info!(
        candidates = extraction.tests_raw.len(),
        confidence = extraction.confidence,
        "抽出完了"
    );

    // 2. 正規化
    let normalized = normalize(&extraction.tests_raw, catalog);
    if normalized.tests.is_empty() {
        return Unprocessed::new(REASON_NO_RECOGNIZABLE).into();
    }

    // 3. 要約（許可リストは正規化の出所から作る）
    let allowed = normalized.provenance_names();
    let summary = match generate_summary(backend, &normalized.tests, &allowed).await {
        Ok(summary) => summary,
        Err(unprocessed) => return unprocessed.into(),
    };

    // 4. 最終レポート
    ProcessOutcome::Completed(ProcessReport {
        tests: normalized.tests,
        summary: summary.summary,
        explanations: summary.explanations,
        status: ProcessStatus::Ok,
        meta: ProcessMeta {
            extraction_confidence: round2(extraction.confidence),
            normalization_confidence: round2(normalized.normalization_confidence),
        },
    })
}
