//! 数値の桁補正（Value Cleaner）
//!
//! OCRで小数点が落ちた・ずれた値を検査項目ごとに補正する。
//! あくまで経験則であり、該当ルールがなければ値をそのまま返す。

/// 検査項目ごとの桁補正
pub fn clean_value(name: &str, value: f64) -> f64 {
    match name {
        "Hemoglobin" if value > 100.0 => value / 10.0,
        "Hemoglobin" if value < 5.0 => value * 10.0,
        "RBC" if value > 10.0 => value / 10.0,
        _ => value,
    }
}
