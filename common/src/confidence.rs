//! ステージ信頼度の算出
//!
//! - 抽出: テキスト解析の信頼度とOCRエンジンの信頼度を 0.7 / 0.3 で合成
//! - 正規化: 1件以上得られれば固定値

use crate::types::NORMALIZATION_CONFIDENCE;

/// 候補が1件以上あるときのテキスト解析信頼度
pub const PARSE_CONFIDENCE: f64 = 0.8;

const PARSE_WEIGHT: f64 = 0.7;
const OCR_WEIGHT: f64 = 0.3;

/// テキスト解析の信頼度
pub fn parse_confidence(candidate_count: usize) -> f64 {
    if candidate_count > 0 {
        PARSE_CONFIDENCE
    } else {
        0.0
    }
}

/// OCRエンジンの信頼度を [0, 1] に揃える
///
/// Tesseract系は 0-100 で返すため、1を超える値は百分率とみなす。
pub fn normalize_ocr_confidence(raw: f64) -> f64 {
    if !raw.is_finite() {
        return 0.0;
    }
    let value = if raw > 1.0 { raw / 100.0 } else { raw };
    value.clamp(0.0, 1.0)
}

/// 抽出信頼度（OCRを使った場合のみ合成）
pub fn extraction_confidence(parse: f64, ocr: Option<f64>) -> f64 {
    let blended = match ocr {
        Some(ocr) => parse * PARSE_WEIGHT + normalize_ocr_confidence(ocr) * OCR_WEIGHT,
        None => parse,
    };
    round2(blended.clamp(0.0, 1.0))
}

/// 正規化信頼度
pub fn normalization_confidence(test_count: usize) -> f64 {
    if test_count > 0 {
        NORMALIZATION_CONFIDENCE
    } else {
        0.0
    }
}

/// 小数第2位に丸める
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
