//! 要約生成
//!
//! 要約AIは外部の協調者として扱う。ここでは
//! ガード → プロンプト生成 → AI呼び出し → 応答検証 → 言及名のガード
//! の順に処理し、どこで止まっても「未処理」シグナルを返す。

mod ai_cli;

pub use ai_cli::AiCliBackend;

use crate::error::Result;
use lab_summary_common::types::{REASON_NO_TESTS, REASON_SUMMARY_FAILED};
use lab_summary_common::{
    build_summary_prompt, guard, guard_names, parse_summary_response, NormalizedTest,
    SummaryResponse, Unprocessed,
};

/// 要約AIの呼び出し口
#[allow(async_fn_in_trait)]
pub trait SummaryBackend {
    /// プロンプトを渡し、生のテキスト応答を返す
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// 検査結果の要約を生成する
///
/// # Arguments
/// * `backend` - 要約AI
/// * `tests` - 正規化済みの検査結果
/// * `allowed_names` - 元の入力から得た検査名（正規化の出所）
pub async fn generate_summary<B, S>(
    backend: &B,
    tests: &[NormalizedTest],
    allowed_names: &[S],
) -> std::result::Result<SummaryResponse, Unprocessed>
where
    B: SummaryBackend,
    S: AsRef<str>,
{
    if tests.is_empty() {
        return Err(Unprocessed::new(REASON_NO_TESTS));
    }

    if let Some(rejection) = guard(tests, allowed_names) {
        return Err(rejection);
    }

    let prompt = build_summary_prompt(tests);
    tracing::debug!(prompt_len = prompt.len(), "要約プロンプト生成");

    let response = match backend.complete(&prompt).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, "要約AIの呼び出しに失敗");
            return Err(Unprocessed::new(REASON_SUMMARY_FAILED));
        }
    };
    tracing::debug!(response_len = response.len(), "要約AI応答");

    let summary = parse_summary_response(&response)?;

    // 要約が言及した名前も元の入力に限る
    if let Some(rejection) = guard_names(summary.tests.iter().map(String::as_str), allowed_names) {
        return Err(rejection);
    }

    Ok(summary)
}
