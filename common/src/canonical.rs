//! 検査名の正規化（Canonicalizer）
//!
//! 自由記述のセグメントを参照表の正式名へ対応づける。
//! 優先順位付きのエイリアス表を上から評価し、最初に部分一致したものを採用する。

/// (エイリアス, 正式名) を優先順に並べた表（小文字の部分一致）
const ALIASES: &[(&str, &str)] = &[
    ("hemoglobin", "Hemoglobin"),
    ("haemoglobin", "Hemoglobin"),
    ("hb", "Hemoglobin"),
    ("rbc", "RBC"),
    ("rec", "RBC"),
    ("wbc", "WBC"),
    ("tlc", "WBC"),
    ("leucocyte", "WBC"),
    ("leukocyte", "WBC"),
    ("platelet", "Platelet"),
    ("plt", "Platelet"),
    ("pcv", "PCV"),
    ("packed cell volume", "PCV"),
    ("hct", "PCV"),
    ("hematocrit", "PCV"),
    ("haematocrit", "PCV"),
    ("neutro", "Neutrophils"),
    ("lympho", "Lymphocytes"),
    ("eosino", "Eosinophils"),
    ("mono", "Monocytes"),
    ("baso", "Basophils"),
];

/// 別の検査なのにエイリアスを含んでしまう名前
const EXCLUDED: &[&str] = &["hba1c"];

/// セグメントから正式名を求める
///
/// 一致しなければ `None`。返す名前が参照表にあるかは呼び出し側で確認する。
pub fn canonicalize(segment: &str) -> Option<&'static str> {
    let lowered = segment.to_lowercase();
    if EXCLUDED.iter().any(|name| lowered.contains(name)) {
        return None;
    }
    ALIASES
        .iter()
        .find(|(alias, _)| lowered.contains(alias))
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ReferenceCatalog;

    #[test]
    fn test_canonicalize_full_names() {
        assert_eq!(canonicalize("Hemoglobin 12.5 g/dL"), Some("Hemoglobin"));
        assert_eq!(canonicalize("Platelet Count 250000 /cumm"), Some("Platelet"));
        assert_eq!(canonicalize("Packed Cell Volume 42 %"), Some("PCV"));
        assert_eq!(canonicalize("Neutrophils 60 %"), Some("Neutrophils"));
        assert_eq!(canonicalize("LYMPHOCYTES 30 %"), Some("Lymphocytes"));
        assert_eq!(canonicalize("Eosinophils 3 %"), Some("Eosinophils"));
        assert_eq!(canonicalize("Monocytes 6 %"), Some("Monocytes"));
        assert_eq!(canonicalize("Basophils 1 %"), Some("Basophils"));
    }

    #[test]
    fn test_canonicalize_acronyms() {
        assert_eq!(canonicalize("Hb 12.5 g/dL"), Some("Hemoglobin"));
        assert_eq!(canonicalize("RBC Count 4.8 mill/cumm"), Some("RBC"));
        assert_eq!(canonicalize("REC 4.8 mill/cumm"), Some("RBC"));
        assert_eq!(canonicalize("Total WBC 8000 /uL"), Some("WBC"));
        assert_eq!(canonicalize("TLC 8000 /uL"), Some("WBC"));
        assert_eq!(canonicalize("Hct 41 %"), Some("PCV"));
    }

    #[test]
    fn test_acronyms_inside_words() {
        // 複数形やOCRで数値と連結した略語
        assert_eq!(canonicalize("Total WBCs 8000 /uL"), Some("WBC"));
        assert_eq!(canonicalize("RBCs 4.8 mill/cumm"), Some("RBC"));
        assert_eq!(canonicalize("RBC4.8 mill/cumm"), Some("RBC"));
        assert_eq!(canonicalize("Hb12.5 g/dL"), Some("Hemoglobin"));
    }

    #[test]
    fn test_hba1c_is_excluded() {
        assert_eq!(canonicalize("HbA1c 5.6 %"), None);
        assert_eq!(canonicalize("Glycated Hb (HBA1C) 6.1 %"), None);
    }

    #[test]
    fn test_priority_order() {
        // 先に並んだエイリアスが優先される
        assert_eq!(canonicalize("Hemoglobin (Hb) with RBC 12.5 g/dL"), Some("Hemoglobin"));
        assert_eq!(canonicalize("RBC / WBC ratio 1 %"), Some("RBC"));
    }

    #[test]
    fn test_canonicalize_none() {
        assert_eq!(canonicalize("Glucose 90 mg/dL"), None);
        assert_eq!(canonicalize(""), None);
    }

    #[test]
    fn test_all_names_exist_in_builtin_catalog() {
        let catalog = ReferenceCatalog::builtin();
        for (alias, name) in ALIASES {
            assert!(catalog.contains(name), "{} ({}) missing from catalog", name, alias);
        }
    }
}
