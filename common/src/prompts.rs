//! プロンプト生成モジュール
//!
//! 要約AIへ渡すプロンプトを組み立てる。
//! 診断・治療の推奨を禁止し、列挙した検査のみに言及させる。

use crate::types::NormalizedTest;

/// 要約のルール（プロンプトに列挙する）
pub const SUMMARY_RULES: &[&str] = &[
    "Do NOT diagnose or recommend treatment.",
    "Mention ONLY the tests listed below.",
    "Be concise and clear.",
];

/// 要約プロンプト生成
///
/// # Arguments
/// * `tests` - 正規化済みの検査結果
///
/// # Returns
/// 要約用のプロンプト文字列（末尾に検査結果のJSON）
pub fn build_summary_prompt(tests: &[NormalizedTest]) -> String {
    let rules = SUMMARY_RULES
        .iter()
        .map(|rule| format!("- {}", rule))
        .collect::<Vec<_>>()
        .join("\n");

    // Vec<NormalizedTest> のシリアライズは失敗しない
    let tests_json = serde_json::to_string_pretty(tests).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"Summarize these lab results in simple patient-friendly language.
Rules:
{rules}

Return strict JSON:
{{
  "summary": "...",
  "explanations": ["...", "..."],
  "tests": ["names of the tests you mentioned"]
}}

Tests:
{tests_json}
"#
    )
}
