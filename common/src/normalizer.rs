//! 検査結果の正規化（Normalizer）
//!
//! 候補セグメントごとに:
//! 1. 正式名へ対応づけ（参照表にない名前はスキップ）
//! 2. 最初の数値を取り出し桁補正
//! 3. 明示マーカー優先でステータス判定
//! 4. 結果と出所（provenance）を同じ順序で追加

use crate::canonical::canonicalize;
use crate::catalog::ReferenceCatalog;
use crate::cleaner::clean_value;
use crate::confidence::normalization_confidence;
use crate::repair::strip_thousands_separators;
use crate::types::{
    NormalizationOutput, NormalizedTest, ProvenanceEntry, RejectReason, RejectedSegment,
    TestStatus,
};
use regex::Regex;

lazy_static::lazy_static! {
    static ref NUMBER_RE: Regex = Regex::new(r"\d+(?:\.\d+)?").unwrap();
    static ref MARKER_RE: Regex = Regex::new(r"(?i)\((low|high|borderline)\)").unwrap();
}

/// 候補リストを正規化する
///
/// 正規化できないセグメントは結果に含めず、`rejected` に理由を残す。
pub fn normalize<S: AsRef<str>>(candidates: &[S], catalog: &ReferenceCatalog) -> NormalizationOutput {
    let mut output = NormalizationOutput::default();

    for candidate in candidates {
        let raw = candidate.as_ref();
        match normalize_segment(raw, catalog) {
            Ok(test) => {
                output.provenance.push(ProvenanceEntry {
                    raw: raw.to_string(),
                    name: test.name.clone(),
                });
                output.tests.push(test);
            }
            Err(reason) => {
                tracing::debug!(segment = raw, %reason, "セグメントを除外");
                output.rejected.push(RejectedSegment {
                    raw: raw.to_string(),
                    reason,
                });
            }
        }
    }

    output.normalization_confidence = normalization_confidence(output.tests.len());
    tracing::info!(
        accepted = output.tests.len(),
        rejected = output.rejected.len(),
        "正規化完了"
    );
    output
}

/// 1セグメントを正規化
pub fn normalize_segment(
    raw: &str,
    catalog: &ReferenceCatalog,
) -> Result<NormalizedTest, RejectReason> {
    let name = canonicalize(raw).ok_or(RejectReason::NoCanonicalName)?;
    let entry = catalog.get(name).ok_or(RejectReason::NotInCatalog)?;
    let value = first_number(raw).ok_or(RejectReason::NoNumericValue)?;
    let value = clean_value(name, value);

    let ref_range = entry.ref_range();
    let status = explicit_marker(raw).unwrap_or_else(|| ref_range.classify(value));

    Ok(NormalizedTest {
        name: entry.name.clone(),
        value,
        unit: entry.unit.clone(),
        status,
        ref_range,
    })
}

/// 最初の数値（整数または小数）を取り出す
pub fn first_number(segment: &str) -> Option<f64> {
    let cleaned = strip_thousands_separators(segment);
    NUMBER_RE
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// 括弧付きの明示マーカー（"(Low)" など）
pub fn explicit_marker(segment: &str) -> Option<TestStatus> {
    MARKER_RE
        .captures(segment)
        .and_then(|caps| TestStatus::from_word(&caps[1]))
}
