//! AIレスポンスパーサー
//!
//! AI CLIの出力から要約JSONを取り出し、形式を検証する。

use crate::error::{Error, Result};
use crate::types::{SummaryResponse, Unprocessed, REASON_SUMMARY_MALFORMED};
use serde_json::Value;

/// レスポンスからJSONオブジェクト部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の {...} オブジェクト
/// 3. エラー
///
/// # Examples
/// ```
/// use lab_summary_common::extract_json;
///
/// let response = "Here you go: {\"summary\": \"ok\"}";
/// let json = extract_json(response).unwrap();
/// assert_eq!(json, "{\"summary\": \"ok\"}");
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("no JSON object in response".into()))
}

/// 要約レスポンスをパース
///
/// `summary` が空でない文字列、`explanations` が文字列配列でなければ
/// 「AI summary malformed」の未処理シグナルを返す。
pub fn parse_summary_response(response: &str) -> std::result::Result<SummaryResponse, Unprocessed> {
    let malformed = || Unprocessed::new(REASON_SUMMARY_MALFORMED);

    let json_str = extract_json(response).map_err(|_| malformed())?;
    let value: Value = serde_json::from_str(json_str).map_err(|_| malformed())?;

    let summary = value
        .get("summary")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(malformed)?;

    let explanations = value
        .get("explanations")
        .and_then(Value::as_array)
        .ok_or_else(malformed)?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(malformed)?;

    let tests = value
        .get("tests")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(SummaryResponse {
        summary: summary.to_string(),
        explanations,
        tests,
    })
}
