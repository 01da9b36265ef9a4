//! Lab Summary Common Library
//!
//! 検査報告書テキストの抽出 → 正規化 → ハルシネーション・ガードを行うコア。
//! すべて同期・副作用なしの純粋関数で、参照表は読み取り専用で共有する。

pub mod types;
pub mod error;
pub mod catalog;
pub mod repair;
pub mod extractor;
pub mod canonical;
pub mod cleaner;
pub mod normalizer;
pub mod guard;
pub mod confidence;
pub mod prompts;
pub mod parser;

pub use types::{
    ExtractionOutput, NormalizationOutput, NormalizedTest, ProcessMeta, ProcessOutcome,
    ProcessReport, ProcessStatus, ProvenanceEntry, RefRange, RejectReason, RejectedSegment,
    SummaryResponse, TestStatus, Unprocessed,
};
pub use error::{Error, Result};
pub use catalog::{ReferenceCatalog, ReferenceEntry};
pub use extractor::{extract, extract_with_confidence, extract_with_options, ExtractOptions};
pub use canonical::canonicalize;
pub use cleaner::clean_value;
pub use normalizer::normalize;
pub use guard::{guard, guard_names};
pub use prompts::build_summary_prompt;
pub use parser::{extract_json, parse_summary_response};
