//! OCRテキストの修復
//!
//! 検査報告書のOCR結果によく現れる誤りを決定的に修正する。
//! - 桁区切りカンマの除去（`15,000` → `15000`、`1,50,000` → `150000`）
//! - 空白の圧縮、マイクロ記号（µ, μ）→ `u`
//! - 既知の誤読辞書（`Hemog1obin` → `Hemoglobin` など）
//! - 小数点の欠落（`1250 High` → `12.50 High`）
//! - ステータス語の括弧マーカー化（`low` → `(Low)`）

use crate::types::TestStatus;
use regex::{Captures, Regex};

lazy_static::lazy_static! {
    // 最後のグループが3桁の桁区切り（インド式の2桁区切りも許容）
    static ref THOUSANDS_RE: Regex = Regex::new(r"\b\d{1,3}(?:,\d{2,3})*,\d{3}\b").unwrap();
    static ref SPACES_RE: Regex = Regex::new(r"[ \t\u{00A0}]+").unwrap();
    static ref CUMM_RE: Regex = Regex::new(r"(?i)/\s*cu\.?\s*mm\b").unwrap();
    // 単独の4桁 + ステータス語 + 4桁がありえない単位（g/dL, %）
    static ref RUN_ON_RE: Regex = Regex::new(
        r"(?i)(^|[^\d.])(\d{2})(\d{2})(\s*\(?\s*(?:low|high|borderline)\s*\)?\s*(?:g/dl|%))"
    ).unwrap();
    // 括弧書き全体、または括弧外のステータス語
    static ref STATUS_RE: Regex =
        Regex::new(r"(?i)\(([^()]*)\)|\b(low|high|borderline)\b").unwrap();

    /// 既知の誤読 → 正しい表記
    static ref MISREADS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?i)\bh(?:a?e)(?:m|rn)[o0][gq][l1i][o0]b[il1]n\b").unwrap(), "Hemoglobin"),
        (Regex::new(r"(?i)\br[8b]c\b").unwrap(), "RBC"),
        (Regex::new(r"(?i)\b(?:w|vv)[8b]c\b").unwrap(), "WBC"),
        (Regex::new(r"(?i)\bp[l1]ate[l1]et\b").unwrap(), "Platelet"),
        (Regex::new(r"(?i)\bp[l1]ate[l1]ets\b").unwrap(), "Platelets"),
        (Regex::new(r"(?i)\bh[i1l][gq]h\b").unwrap(), "High"),
        (Regex::new(r"(?i)\bl[o0]w\b").unwrap(), "Low"),
    ];
}

/// 整数の桁区切りカンマを除去する
pub fn strip_thousands_separators(text: &str) -> String {
    THOUSANDS_RE
        .replace_all(text, |caps: &Captures| caps[0].replace(',', ""))
        .into_owned()
}

/// 連続する空白を1つに圧縮
pub fn collapse_spaces(text: &str) -> String {
    SPACES_RE.replace_all(text, " ").trim().to_string()
}

/// マイクロ記号と `/cu mm` 表記を統一
pub fn normalize_units(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| match c {
            'µ' | 'μ' => 'u',
            _ => c,
        })
        .collect();
    CUMM_RE.replace_all(&replaced, "/cumm").into_owned()
}

/// 既知の誤読を修正
pub fn fix_misreads(text: &str) -> String {
    let mut result = text.to_string();
    for (pattern, replacement) in MISREADS.iter() {
        if pattern.is_match(&result) {
            result = pattern.replace_all(&result, *replacement).into_owned();
        }
    }
    result
}

/// 小数点が欠落した4桁の数値を修復する
///
/// ステータス語と g/dL・% が直後に続く独立した4桁の数字に限り、
/// 下2桁の前へ小数点を挿入する。小数の一部や他の単位の数値はそのまま。
pub fn repair_run_on_decimal(segment: &str) -> String {
    RUN_ON_RE
        .replace_all(segment, "${1}${2}.${3}${4}")
        .into_owned()
}

/// ステータス語を括弧マーカーに統一（`high` → `(High)`）
///
/// 括弧書きはステータス語だけのときに限り書き換え、それ以外（`(Low normal)` など）は残す。
pub fn mark_status_words(segment: &str) -> String {
    STATUS_RE
        .replace_all(segment, |caps: &Captures| {
            let word = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            match TestStatus::from_word(word) {
                Some(status) => status.marker().to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// セグメント単位の修復をまとめて適用
pub fn repair_segment(segment: &str) -> String {
    let text = normalize_units(segment);
    let text = fix_misreads(&text);
    let text = collapse_spaces(&text);
    let text = repair_run_on_decimal(&text);
    mark_status_words(&text)
}
