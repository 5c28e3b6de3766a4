// Copyright (c) 2025 fanmetrics
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Serialize, Serializer};

use crate::utils::numbers::{self, NormalizedCount};

/// 指标值
///
/// “不可用”与真实零值是不同状态：缺失的页面元素产生 `Unavailable`，
/// 序列化为 "N/A"；提取到的计数（哪怕是 "0"）保留精确数值。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// 提取并归一化后的计数
    Count(NormalizedCount),
    /// 页面上不存在该指标
    Unavailable,
}

impl Metric {
    /// 从提取到的原始字符串构造指标
    ///
    /// # 参数
    ///
    /// * `raw` - 选择器命中的文本，缺失元素传入 `None`
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some(text) if !text.trim().is_empty() => Metric::Count(numbers::normalize(text)),
            _ => Metric::Unavailable,
        }
    }

    /// 供下游运算使用的精确数值
    pub fn value(&self) -> Option<u64> {
        match self {
            Metric::Count(count) => Some(count.value()),
            Metric::Unavailable => None,
        }
    }
}

impl Serialize for Metric {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Metric::Count(count) => serializer.serialize_str(&count.grouped()),
            Metric::Unavailable => serializer.serialize_str("N/A"),
        }
    }
}

/// 文本字段序列化：缺失值输出 "N/A"
pub fn ser_text<S>(field: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match field {
        Some(text) => serializer.serialize_str(text),
        None => serializer.serialize_str("N/A"),
    }
}
