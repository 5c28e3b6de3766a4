// Copyright (c) 2025 fanmetrics
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::Url;

use crate::utils::validators::{self, ValidationError};

/// 艺术家身份
///
/// 平台句柄在构造时归一化：去首尾空白、去前导'@'、去内部空白、转小写。
/// 归一化是确定性且幂等的。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// 平台句柄（已归一化）
    Handle(String),
    /// 外部资源定位符（已校验）
    Locator(Url),
}

impl Identity {
    /// 从用户输入构造句柄身份
    ///
    /// # 参数
    ///
    /// * `raw` - 用户提供的艺术家名称
    ///
    /// # 返回值
    ///
    /// * `Ok(Identity)` - 归一化后的句柄
    /// * `Err(ValidationError)` - 归一化后为空
    pub fn handle(raw: &str) -> Result<Self, ValidationError> {
        let normalized = normalize_handle(raw);
        if normalized.is_empty() {
            return Err(ValidationError::EmptyIdentity);
        }
        Ok(Identity::Handle(normalized))
    }

    /// 从用户输入构造定位符身份
    pub fn locator(raw: &str) -> Result<Self, ValidationError> {
        Ok(Identity::Locator(validators::validate_locator(raw)?))
    }

    pub fn handle_str(&self) -> Option<&str> {
        match self {
            Identity::Handle(handle) => Some(handle),
            Identity::Locator(_) => None,
        }
    }

    pub fn locator_url(&self) -> Option<&Url> {
        match self {
            Identity::Handle(_) => None,
            Identity::Locator(url) => Some(url),
        }
    }
}

/// 句柄归一化
pub fn normalize_handle(raw: &str) -> String {
    raw.trim()
        .trim_start_matches('@')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}
