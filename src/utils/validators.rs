// Copyright (c) 2025 fanmetrics
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;
use url::Url;

/// 校验错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// 身份标识为空
    #[error("identity must be a non-empty handle")]
    EmptyIdentity,
    /// 资源定位符无效
    #[error("locator is not a well-formed http(s) URL")]
    InvalidLocator,
}

impl ValidationError {
    /// 稳定错误码
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyIdentity => "INVALID_IDENTITY",
            ValidationError::InvalidLocator => "INVALID_LOCATOR",
        }
    }
}

/// 校验资源定位符
///
/// # 参数
///
/// * `raw` - 用户提供的目标页面URL
///
/// # 返回值
///
/// * `Ok(Url)` - 解析后的URL
/// * `Err(ValidationError)` - 非http(s)或无主机名
pub fn validate_locator(raw: &str) -> Result<Url, ValidationError> {
    let parsed = Url::parse(raw).map_err(|_| ValidationError::InvalidLocator)?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ValidationError::InvalidLocator);
    }
    if parsed.host_str().is_none() {
        return Err(ValidationError::InvalidLocator);
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_https_catalog_url() {
        let url = validate_locator("https://open.spotify.com/artist/abc123").unwrap();
        assert_eq!(url.host_str(), Some("open.spotify.com"));
    }

    #[test]
    fn test_rejects_non_http_schemes() {
        assert_eq!(
            validate_locator("ftp://example.com/x"),
            Err(ValidationError::InvalidLocator)
        );
        assert_eq!(
            validate_locator("javascript:alert(1)"),
            Err(ValidationError::InvalidLocator)
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(
            validate_locator("not a url"),
            Err(ValidationError::InvalidLocator)
        );
    }
}
