//! ハルシネーション・ガード
//!
//! 要約に渡す（または要約が言及した）検査名が、元の入力から得られた
//! 名前の集合に含まれるかを検証する。許可リストは必ず元の抽出・正規化の
//! 出所から作り、生成側の主張を使ってはならない。

use crate::types::{NormalizedTest, Unprocessed, REASON_HALLUCINATED};
use std::collections::HashSet;

/// 正規化済み検査の名前を検証
///
/// すべて許可リストにあれば `None`、1件でもなければ「未処理」シグナル。
pub fn guard<S: AsRef<str>>(tests: &[NormalizedTest], allowed_names: &[S]) -> Option<Unprocessed> {
    guard_names(tests.iter().map(|t| t.name.as_str()), allowed_names)
}

/// 任意の名前リストを検証（大文字小文字は無視）
pub fn guard_names<'a, I, S>(names: I, allowed_names: &[S]) -> Option<Unprocessed>
where
    I: IntoIterator<Item = &'a str>,
    S: AsRef<str>,
{
    let allowed: HashSet<String> = allowed_names
        .iter()
        .map(|n| n.as_ref().to_lowercase())
        .collect();

    let unknown: Vec<&str> = names
        .into_iter()
        .filter(|name| !allowed.contains(&name.to_lowercase()))
        .collect();

    if unknown.is_empty() {
        None
    } else {
        tracing::warn!(?unknown, "入力にない検査名を検出");
        Some(Unprocessed::new(REASON_HALLUCINATED))
    }
}
