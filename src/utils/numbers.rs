// Copyright (c) 2025 fanmetrics
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;

use serde::Serialize;

/// 归一化计数
///
/// 保留精确数值用于下游运算，显示时输出千位分组字符串。
/// 序列化为分组后的字符串形式（如 "1,000,000"）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NormalizedCount {
    value: u64,
}

impl NormalizedCount {
    pub const ZERO: NormalizedCount = NormalizedCount { value: 0 };

    pub fn new(value: u64) -> Self {
        Self { value }
    }

    /// 精确数值
    pub fn value(&self) -> u64 {
        self.value
    }

    /// 千位分组的显示形式
    pub fn grouped(&self) -> String {
        let digits = self.value.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }
}

impl fmt::Display for NormalizedCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.grouped())
    }
}

impl Serialize for NormalizedCount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.grouped())
    }
}

/// 解析缩写计数
///
/// 规则（确定性，全函数）：
/// - 尾数取首个数字起的前导数字串：数字、整数部分内的分组逗号、
///   最多一个小数点；第二个小数点或其他字符终止尾数
///   （"1.2.3K" 的尾数为 "1.2"，"3,456,789 monthly listeners" 为 "3456789"）
/// - 乘数看紧跟尾数的那个字符，不区分大小写：
///   'k' 乘以 1,000，'m' 乘以 1,000,000，其余乘以 1。
///   后文无关单词中的字母（如 "monthly"）不参与判定
/// - 小数部分按乘数精确缩放，除不尽的亚单位余数向零截断（"1.5" 乘数 1 得 1）
/// - 无任何数字的输入得 0
///
/// # 参数
///
/// * `raw` - 页面提取出的原始计数字符串
///
/// # 返回值
///
/// 归一化后的精确计数
pub fn normalize(raw: &str) -> NormalizedCount {
    let chars: Vec<char> = raw.chars().collect();
    let Some(start) = chars.iter().position(|c| c.is_ascii_digit()) else {
        return NormalizedCount::ZERO;
    };

    let mut int_digits = String::new();
    let mut frac_digits = String::new();
    let mut seen_point = false;
    let mut end = chars.len();
    for (i, &ch) in chars.iter().enumerate().skip(start) {
        match ch {
            '0'..='9' => {
                if seen_point {
                    frac_digits.push(ch);
                } else {
                    int_digits.push(ch);
                }
            }
            // Grouping separators inside the integer part are noise.
            ',' if !seen_point => {}
            '.' if !seen_point => {
                seen_point = true;
            }
            _ => {
                end = i;
                break;
            }
        }
    }

    let multiplier: u64 = match chars.get(end).map(|c| c.to_ascii_lowercase()) {
        Some('k') => 1_000,
        Some('m') => 1_000_000,
        _ => 1,
    };

    let int_part: u128 = int_digits.parse().unwrap_or(0);
    let mut value = int_part.saturating_mul(multiplier as u128);

    if !frac_digits.is_empty() {
        let scale = 10u128.pow(frac_digits.len().min(18) as u32);
        let frac_part: u128 = frac_digits.parse().unwrap_or(0);
        value = value.saturating_add(frac_part.saturating_mul(multiplier as u128) / scale);
    }

    NormalizedCount::new(value.min(u64::MAX as u128) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_multipliers() {
        assert_eq!(normalize("1.5K").value(), 1_500);
        assert_eq!(normalize("2M").value(), 2_000_000);
        assert_eq!(normalize("12.3k").value(), 12_300);
        assert_eq!(normalize("1M").value(), 1_000_000);
        assert_eq!(normalize("5M").value(), 5_000_000);
    }

    #[test]
    fn test_plain_numbers_are_idempotent() {
        assert_eq!(normalize("42").value(), 42);
        assert_eq!(normalize("12,345").value(), 12_345);
        // Normalizing an already-canonical rendering returns the same value.
        let first = normalize("987654");
        assert_eq!(normalize(&first.grouped()).value(), first.value());
    }

    #[test]
    fn test_degenerate_inputs_are_zero() {
        assert_eq!(normalize("").value(), 0);
        assert_eq!(normalize("N/A").value(), 0);
        assert_eq!(normalize("--").value(), 0);
    }

    #[test]
    fn test_trailing_words_are_not_suffixes() {
        // 'm' in "monthly" sits after a space, not after the mantissa.
        assert_eq!(normalize("3,456,789 monthly listeners").value(), 3_456_789);
        assert_eq!(normalize("120,345,678").value(), 120_345_678);
    }

    #[test]
    fn test_malformed_decimal_uses_leading_run() {
        // Second '.' terminates the mantissa ("1.2"); no adjacent suffix,
        // so the sub-unit fraction truncates.
        assert_eq!(normalize("1.2.3K").value(), 1);
        assert_eq!(normalize("1.2.3").value(), 1);
    }

    #[test]
    fn test_subunit_remainder_truncates() {
        assert_eq!(normalize("1.5").value(), 1);
        assert_eq!(normalize("1.55K").value(), 1_550);
        assert_eq!(normalize("1.555K").value(), 1_555);
        assert_eq!(normalize("1.5555K").value(), 1_555);
    }

    #[test]
    fn test_grouped_display() {
        assert_eq!(normalize("1M").grouped(), "1,000,000");
        assert_eq!(NormalizedCount::new(0).grouped(), "0");
        assert_eq!(NormalizedCount::new(999).grouped(), "999");
        assert_eq!(NormalizedCount::new(1_000).grouped(), "1,000");
    }
}
