//! 顯示用數值格式化
//!
//! 引擎輸出不做四捨五入，只在這裡為顯示而捨入（四捨五入，遠離零）。

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// 數值格式化：固定小數位數並加千分位
pub fn format_number(value: f64, decimals: u32) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let fixed = match Decimal::from_f64(value) {
        Some(d) => {
            let rounded = d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.*}", decimals as usize, rounded)
        }
        // 超出 Decimal 範圍
        None => format!("{:.*}", decimals as usize, value),
    };

    group_thousands(&fixed)
}

/// 金額（2 位小數）
pub fn format_currency(value: f64) -> String {
    format_number(value, 2)
}

/// 百分比（1 位小數）
pub fn format_percentage(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    format!("{}%", format_number(value, 1))
}

/// 可選值，None 顯示為 "-"
pub fn format_optional(value: Option<f64>, decimals: u32) -> String {
    value.map_or_else(|| "-".to_string(), |v| format_number(v, decimals))
}

fn group_thousands(fixed: &str) -> String {
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // "-0.00" 之類的負零不顯示負號
    let is_zero = grouped.chars().all(|c| c == '0' || c == ',')
        && frac_part.map_or(true, |f| f.chars().all(|c| c == '0'));
    let sign = if is_zero { "" } else { sign };

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
