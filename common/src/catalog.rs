//! 参照表（Reference Catalog）
//!
//! 検査項目ごとの単位と基準範囲。起動時に一度だけ構築し、
//! 以降は読み取り専用で各関数へ参照渡しする。

use crate::error::{Error, Result};
use crate::types::RefRange;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// 参照表の1エントリ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub name: String,
    pub unit: String,
    pub low: f64,
    pub high: f64,
}

impl ReferenceEntry {
    pub fn ref_range(&self) -> RefRange {
        RefRange {
            low: self.low,
            high: self.high,
        }
    }
}

/// JSONファイル上の表現（名前はキー側）
#[derive(Debug, Clone, Deserialize)]
struct RangeSpec {
    unit: String,
    low: f64,
    high: f64,
}

/// 組み込み参照表: (名前, 単位, 下限, 上限)
const BUILTIN_RANGES: &[(&str, &str, f64, f64)] = &[
    ("Hemoglobin", "g/dL", 12.0, 15.0),
    ("WBC", "/uL", 4000.0, 11000.0),
    ("Platelet", "/cumm", 150000.0, 410000.0),
    ("PCV", "%", 40.0, 50.0),
    ("RBC", "mill/cumm", 4.5, 5.5),
    ("Neutrophils", "%", 50.0, 62.0),
    ("Lymphocytes", "%", 20.0, 40.0),
    ("Eosinophils", "%", 0.0, 6.0),
    ("Monocytes", "%", 0.0, 10.0),
    ("Basophils", "%", 0.0, 2.0),
];

lazy_static::lazy_static! {
    static ref BUILTIN: ReferenceCatalog = ReferenceCatalog::builtin();
}

/// 参照表
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceCatalog {
    entries: Vec<ReferenceEntry>,
}

impl Default for ReferenceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ReferenceCatalog {
    /// 組み込みの血算（CBC）参照表
    pub fn builtin() -> Self {
        let entries = BUILTIN_RANGES
            .iter()
            .map(|(name, unit, low, high)| ReferenceEntry {
                name: name.to_string(),
                unit: unit.to_string(),
                low: *low,
                high: *high,
            })
            .collect();
        Self { entries }
    }

    /// プロセス共有の組み込み参照表
    pub fn shared() -> &'static ReferenceCatalog {
        &BUILTIN
    }

    /// エントリから構築（検証あり）
    pub fn from_entries(entries: Vec<ReferenceEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            validate_entry(entry)?;
            if !seen.insert(entry.name.to_lowercase()) {
                return Err(Error::Config(format!("duplicate analyte: {}", entry.name)));
            }
        }
        Ok(Self { entries })
    }

    /// JSON文字列から読み込み
    ///
    /// 形式: `{"Hemoglobin": {"unit": "g/dL", "low": 12.0, "high": 15.0}, ...}`
    pub fn from_json(json: &str) -> Result<Self> {
        let specs: HashMap<String, RangeSpec> = serde_json::from_str(json)?;
        let mut entries: Vec<ReferenceEntry> = specs
            .into_iter()
            .map(|(name, spec)| ReferenceEntry {
                name,
                unit: spec.unit,
                low: spec.low,
                high: spec.high,
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Self::from_entries(entries)
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 正式名で検索（大文字小文字は無視）
    pub fn get(&self, name: &str) -> Option<&ReferenceEntry> {
        self.entries.iter().find(|e| e.name.eq_ignore_ascii_case(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_entry(entry: &ReferenceEntry) -> Result<()> {
    if entry.name.trim().is_empty() {
        return Err(Error::Config("analyte name is empty".into()));
    }
    if entry.unit.trim().is_empty() {
        return Err(Error::Config(format!("{}: unit is empty", entry.name)));
    }
    if !entry.low.is_finite() || !entry.high.is_finite() {
        return Err(Error::Config(format!("{}: bounds must be finite", entry.name)));
    }
    if entry.low > entry.high {
        return Err(Error::Config(format!("{}: low exceeds high", entry.name)));
    }
    Ok(())
}
