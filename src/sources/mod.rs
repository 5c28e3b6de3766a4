// Copyright (c) 2025 fanmetrics
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 互动率计算器数据源
pub mod engagement;

/// Instagram主页数据源
pub mod instagram;

/// Spotify曲目目录数据源
pub mod spotify;

/// TikTok主页数据源
pub mod tiktok;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::browser::request_filter::RequestFilter;
use crate::browser::{MarkerState, NavigationError, SessionFactory, WaitPolicy};
use crate::domain::identity::Identity;
use crate::domain::payload::{SourceFailure, SourcePayload};

/// 提取错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// 底层导航失败
    #[error("navigation failed: {0}")]
    Navigation(#[from] NavigationError),
    /// 等待策略完成后必需的标记元素仍缺失
    ///
    /// 说明页面布局已变化或访问被拒绝
    #[error("required element missing: {0}")]
    MissingRequiredElement(&'static str),
}

impl ExtractError {
    /// 稳定错误码
    pub fn code(&self) -> &'static str {
        match self {
            ExtractError::Navigation(NavigationError::Timeout) => "TIMEOUT",
            ExtractError::Navigation(NavigationError::NetworkFailure(_)) => "NETWORK_FAILURE",
            ExtractError::Navigation(NavigationError::Blocked(_)) => "BLOCKED",
            ExtractError::MissingRequiredElement(_) => "MISSING_ELEMENT",
        }
    }
}

impl From<&ExtractError> for SourceFailure {
    fn from(error: &ExtractError) -> Self {
        SourceFailure {
            code: error.code(),
            message: error.to_string(),
        }
    }
}

/// 数据源提取器
///
/// 每个外部平台一个实现；封装URL模板、等待策略、
/// 超时上限与页面内容到载荷的映射。
#[async_trait]
pub trait SourceExtractor: Send + Sync {
    /// 数据源名称（聚合响应中的键）
    fn name(&self) -> &'static str;

    /// 对给定身份执行一次完整提取
    async fn run(&self, identity: &Identity) -> Result<SourcePayload, ExtractError>;
}

/// 单次页面提取任务的描述
pub(crate) struct PageTask {
    pub url: String,
    pub wait: WaitPolicy,
    pub timeout: Duration,
    pub deny_patterns: &'static [&'static str],
    pub script: &'static str,
}

/// 执行一次页面提取
///
/// 打开会话 → 导航并等待 → 求值提取脚本 → 关闭会话。
/// 会话在成功与每条失败路径上都恰好关闭一次。
pub(crate) async fn harvest<T: DeserializeOwned>(
    factory: &dyn SessionFactory,
    task: PageTask,
) -> Result<T, ExtractError> {
    let filter = RequestFilter::new(task.url.clone(), task.deny_patterns);
    let mut session = factory.open(filter).await.map_err(ExtractError::from)?;

    let outcome = async {
        let marker = session
            .navigate_to(&task.url, &task.wait, task.timeout)
            .await?;
        if let MarkerState::Missing(selector) = marker {
            return Err(ExtractError::MissingRequiredElement(selector));
        }
        Ok(session.extract::<T>(task.script).await?)
    }
    .await;

    session.close().await;
    outcome
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::browser::{PageDriver, PageSession};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Scripted in-memory driver standing in for the browser engine.
    pub struct FakeDriver {
        pub navigate_result: Result<(), NavigationError>,
        pub marker: MarkerState,
        pub evaluate_result: Result<serde_json::Value, NavigationError>,
        pub close_count: Arc<AtomicUsize>,
    }

    impl FakeDriver {
        pub fn succeeding(value: serde_json::Value, close_count: Arc<AtomicUsize>) -> Self {
            Self {
                navigate_result: Ok(()),
                marker: MarkerState::Satisfied,
                evaluate_result: Ok(value),
                close_count,
            }
        }
    }

    #[async_trait]
    impl PageDriver for FakeDriver {
        async fn navigate(&self, _url: &str, _timeout: Duration) -> Result<(), NavigationError> {
            self.navigate_result.clone()
        }

        async fn wait_for(
            &self,
            _policy: &WaitPolicy,
            _timeout: Duration,
        ) -> Result<MarkerState, NavigationError> {
            Ok(self.marker)
        }

        async fn evaluate(&self, _expression: &str) -> Result<serde_json::Value, NavigationError> {
            self.evaluate_result.clone()
        }

        async fn close(self: Box<Self>) {
            self.close_count.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Factory producing one scripted driver per open call.
    pub struct FakeFactory {
        pub navigate_result: Result<(), NavigationError>,
        pub marker: MarkerState,
        pub evaluate_result: Result<serde_json::Value, NavigationError>,
        pub close_count: Arc<AtomicUsize>,
    }

    impl FakeFactory {
        pub fn new(value: serde_json::Value) -> Self {
            Self {
                navigate_result: Ok(()),
                marker: MarkerState::Satisfied,
                evaluate_result: Ok(value),
                close_count: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl SessionFactory for FakeFactory {
        async fn open(&self, _filter: RequestFilter) -> Result<PageSession, NavigationError> {
            Ok(PageSession::new(Box::new(FakeDriver {
                navigate_result: self.navigate_result.clone(),
                marker: self.marker,
                evaluate_result: self.evaluate_result.clone(),
                close_count: Arc::clone(&self.close_count),
            })))
        }
    }
}
