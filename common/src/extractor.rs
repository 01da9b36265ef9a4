//! 検査行候補の抽出（Candidate Extractor）
//!
//! ## 処理フロー
//! 1. 桁区切りカンマを除去してから改行（と `,` `;`）で分割
//! 2. 氏名・年齢などのメタデータ行を除外
//! 3. OCR修復とステータス語のマーカー化
//! 4. 数字と単位を含む行だけを残す
//! 5. 重複を除去（出現順を維持）

use crate::confidence::{extraction_confidence, parse_confidence};
use crate::repair::{repair_segment, strip_thousands_separators};
use crate::types::ExtractionOutput;
use regex::Regex;
use std::collections::HashSet;

/// 検査行ではないメタデータの接頭辞（小文字）
const METADATA_PREFIXES: &[&str] = &[
    "name",
    "age",
    "sex",
    "gender",
    "patient",
    "sample",
    "address",
    "registered",
    "reported",
    "collected",
    "referred",
    "interpretation",
    "instrument",
    "clinical",
    "end of report",
];

lazy_static::lazy_static! {
    static ref LINE_SPLIT_RE: Regex = Regex::new(r"[\r\n]+").unwrap();
    static ref SEPARATOR_SPLIT_RE: Regex = Regex::new(r"[\r\n,;]+").unwrap();
    static ref DIGIT_RE: Regex = Regex::new(r"\d").unwrap();
    static ref UNIT_RE: Regex = Regex::new(
        r"(?i)(g/dl|mg/dl|mmol/l|/cumm|/ul|%|10\^\d+\s*/\s*[a-z]+|\bpg\b|\bfl\b)"
    ).unwrap();
    static ref WORD_RE: Regex = Regex::new(r"[A-Za-z]{3,}").unwrap();
}

/// 抽出オプション
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// 改行に加えて `,` `;` でも分割する
    pub split_on_separators: bool,
    /// 3文字以上の英単語を必須にする（厳格モード）
    pub require_word: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            split_on_separators: true,
            require_word: false,
        }
    }
}

/// テキストから検査行候補を抽出（デフォルト設定）
pub fn extract(text: &str) -> Vec<String> {
    extract_with_options(text, &ExtractOptions::default())
}

/// テキストから検査行候補を抽出
///
/// 条件を満たさない行は黙って捨てる。全行が除外された場合は空のVec。
pub fn extract_with_options(text: &str, options: &ExtractOptions) -> Vec<String> {
    let text = strip_thousands_separators(text);
    let splitter: &Regex = if options.split_on_separators {
        &SEPARATOR_SPLIT_RE
    } else {
        &LINE_SPLIT_RE
    };

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for segment in splitter.split(&text) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        if is_metadata(segment) {
            tracing::debug!(segment, "メタデータ行を除外");
            continue;
        }

        let repaired = repair_segment(segment);
        if !looks_like_test_line(&repaired, options) {
            tracing::debug!(segment, "検査行の条件を満たさない");
            continue;
        }

        if seen.insert(repaired.clone()) {
            candidates.push(repaired);
        }
    }

    tracing::debug!(count = candidates.len(), "候補抽出完了");
    candidates
}

/// 抽出して信頼度を付ける
///
/// `ocr_confidence` はOCR経由のときのみ指定（0-1 または 0-100）。
pub fn extract_with_confidence(
    text: &str,
    options: &ExtractOptions,
    ocr_confidence: Option<f64>,
) -> ExtractionOutput {
    let tests_raw = extract_with_options(text, options);
    let confidence = extraction_confidence(parse_confidence(tests_raw.len()), ocr_confidence);
    ExtractionOutput { tests_raw, confidence }
}

/// メタデータ行か判定（大文字小文字を無視した前方一致）
pub fn is_metadata(segment: &str) -> bool {
    let lowered = segment.trim_start().to_lowercase();
    METADATA_PREFIXES.iter().any(|prefix| lowered.starts_with(prefix))
}

fn looks_like_test_line(segment: &str, options: &ExtractOptions) -> bool {
    DIGIT_RE.is_match(segment)
        && UNIT_RE.is_match(segment)
        && (!options.require_word || WORD_RE.is_match(segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_line() {
        assert_eq!(extract("Hemoglobin 12.5 g/dL"), vec!["Hemoglobin 12.5 g/dL"]);
    }

    #[test]
    fn test_extract_drops_metadata() {
        let text = "Name: John Doe\nAge: 45\nSex: M\nHemoglobin 12.5 g/dL\nEnd of Report";
        assert_eq!(extract(text), vec!["Hemoglobin 12.5 g/dL"]);
    }

    #[test]
    fn test_metadata_prefix_case_insensitive() {
        assert!(is_metadata("NAME: JANE"));
        assert!(is_metadata("Reported On 12/03/2024 10:00 %"));
        assert!(is_metadata("  end of report"));
        assert!(!is_metadata("Neutrophils 60 %"));
    }

    #[test]
    fn test_extract_requires_digit_and_unit() {
        let text = "Complete Blood Count\nHemoglobin g/dL\nWBC 8000\nWBC 8000 /uL";
        assert_eq!(extract(text), vec!["WBC 8000 /uL"]);
    }

    #[test]
    fn test_extract_unit_tokens() {
        let text = "MCH 29 pg\nMCV 88 fL\nGlucose 90 mg/dL\nUrea 5 mmol/L\nWBC 8.1 10^3/uL\nPlatelet 250000 /cumm";
        assert_eq!(extract(text).len(), 6);
    }

    #[test]
    fn test_extract_splits_on_separators() {
        let text = "Hb 12.5 g/dL, WBC 15,000 /uL; Platelet 1,50,000 /cumm";
        assert_eq!(
            extract(text),
            vec!["Hb 12.5 g/dL", "WBC 15000 /uL", "Platelet 150000 /cumm"]
        );
    }

    #[test]
    fn test_extract_lines_only() {
        let options = ExtractOptions {
            split_on_separators: false,
            ..Default::default()
        };
        let text = "Hb 12.5 g/dL, WBC 8000 /uL";
        assert_eq!(extract_with_options(text, &options), vec!["Hb 12.5 g/dL, WBC 8000 /uL"]);
    }

    #[test]
    fn test_strict_mode_requires_word() {
        let strict = ExtractOptions {
            require_word: true,
            ..Default::default()
        };
        assert!(extract_with_options("Hb 12.5 g/dL", &strict).is_empty());
        assert_eq!(
            extract_with_options("Hemoglobin 12.5 g/dL", &strict),
            vec!["Hemoglobin 12.5 g/dL"]
        );
    }

    #[test]
    fn test_extract_applies_repairs() {
        let text = "Hemog1obin   1150 low g/dL\nWBC 15000 Hiqh /µL";
        assert_eq!(
            extract(text),
            vec!["Hemoglobin 11.50 (Low) g/dL", "WBC 15000 (High) /uL"]
        );
    }

    #[test]
    fn test_extract_deduplicates_in_order() {
        let text = "WBC 8000 /uL\nHemoglobin 12.5 g/dL\nWBC  8000 /uL\nHemoglobin 12.5 g/dL";
        assert_eq!(extract(text), vec!["WBC 8000 /uL", "Hemoglobin 12.5 g/dL"]);
    }

    #[test]
    fn test_extract_empty_input() {
        assert!(extract("").is_empty());
        assert!(extract("   \n\n ").is_empty());
        assert!(extract("Name: John Doe\nAge: 45").is_empty());
    }

    #[test]
    fn test_extract_with_confidence() {
        let options = ExtractOptions::default();
        let plain = extract_with_confidence("WBC 8000 /uL", &options, None);
        assert_eq!(plain.tests_raw, vec!["WBC 8000 /uL"]);
        assert_eq!(plain.confidence, 0.8);

        let ocr = extract_with_confidence("WBC 8000 /uL", &options, Some(90.0));
        assert_eq!(ocr.confidence, 0.83);

        let empty = extract_with_confidence("Name: John", &options, None);
        assert!(empty.tests_raw.is_empty());
        assert_eq!(empty.confidence, 0.0);
    }
}
