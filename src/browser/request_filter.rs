// Copyright (c) 2025 fanmetrics
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 拦截到的出站请求描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    /// 请求目标地址
    pub url: String,
    /// 是否为文档级导航请求（而非资源加载）
    pub is_navigation: bool,
}

/// 过滤决策
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    Allow,
    Abort,
}

/// 导航过滤器
///
/// 纯谓词：对每个出站请求同步求值，无副作用。
/// 仅当请求是文档级导航、且不是调用方请求的主导航、
/// 且目标命中拒绝模式（如登录跳转）时才中止；其余一律放行。
#[derive(Debug, Clone)]
pub struct RequestFilter {
    primary_url: String,
    deny_patterns: Vec<String>,
}

impl RequestFilter {
    pub fn new(primary_url: impl Into<String>, deny_patterns: &[&str]) -> Self {
        Self {
            primary_url: primary_url.into(),
            deny_patterns: deny_patterns.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// 对单个请求求值
    pub fn decide(&self, request: &NavigationRequest) -> FilterDecision {
        if !request.is_navigation {
            return FilterDecision::Allow;
        }
        if request.url == self.primary_url {
            return FilterDecision::Allow;
        }
        if self
            .deny_patterns
            .iter()
            .any(|pattern| request.url.contains(pattern.as_str()))
        {
            return FilterDecision::Abort;
        }
        FilterDecision::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> RequestFilter {
        RequestFilter::new("https://www.tiktok.com/@exampleartist", &["login"])
    }

    #[test]
    fn test_primary_navigation_allowed() {
        let decision = filter().decide(&NavigationRequest {
            url: "https://www.tiktok.com/@exampleartist".to_string(),
            is_navigation: true,
        });
        assert_eq!(decision, FilterDecision::Allow);
    }

    #[test]
    fn test_login_redirect_aborted() {
        let decision = filter().decide(&NavigationRequest {
            url: "https://www.tiktok.com/login?redirect_url=...".to_string(),
            is_navigation: true,
        });
        assert_eq!(decision, FilterDecision::Abort);
    }

    #[test]
    fn test_subresources_never_aborted() {
        // Even a denied pattern passes when it is not a navigation.
        let decision = filter().decide(&NavigationRequest {
            url: "https://cdn.tiktok.com/login-widget.js".to_string(),
            is_navigation: false,
        });
        assert_eq!(decision, FilterDecision::Allow);
    }

    #[test]
    fn test_unrelated_navigation_allowed() {
        let decision = filter().decide(&NavigationRequest {
            url: "https://www.tiktok.com/@exampleartist/video/123".to_string(),
            is_navigation: true,
        });
        assert_eq!(decision, FilterDecision::Allow);
    }
}
