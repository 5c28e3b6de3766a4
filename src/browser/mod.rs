// Copyright (c) 2025 fanmetrics
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Chromium驱动模块
///
/// 基于chromiumoxide的会话工厂与驱动实现
pub mod chromium;

/// 导航过滤模块
pub mod request_filter;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::browser::request_filter::RequestFilter;

/// 导航错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// 导航超时
    #[error("navigation timed out")]
    Timeout,
    /// 网络层失败（DNS/连接）
    #[error("network failure: {0}")]
    NetworkFailure(String),
    /// 目标拒绝提供可用页面
    #[error("target refused to serve a usable page: {0}")]
    Blocked(String),
}

/// 页面等待策略
#[derive(Debug, Clone)]
pub enum WaitPolicy {
    /// 等待主导航完成后再静置一段时间
    NetworkIdle { settle: Duration },
    /// 轮询等待指定标记元素出现
    Selector(&'static str),
}

/// 等待策略完成后的标记元素状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerState {
    /// 标记元素已出现（或策略不要求标记）
    Satisfied,
    /// 标记元素在超时内未出现
    Missing(&'static str),
}

/// 页面驱动契约
///
/// 核心只通过 navigate/wait/evaluate/close 四个操作驱动浏览器引擎；
/// 生产实现为 [`chromium::ChromiumDriver`]，测试使用内存伪实现。
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// 导航到目标URL，超时由调用方给定
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), NavigationError>;

    /// 执行等待策略，返回标记元素状态
    async fn wait_for(
        &self,
        policy: &WaitPolicy,
        timeout: Duration,
    ) -> Result<MarkerState, NavigationError>;

    /// 在页面上下文中求值并返回JSON结果
    async fn evaluate(&self, expression: &str) -> Result<serde_json::Value, NavigationError>;

    /// 关闭会话并释放底层资源
    async fn close(self: Box<Self>);
}

/// 会话工厂
///
/// 每次调用返回一个独占的新会话；进程内不保留共享浏览器实例。
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn open(&self, filter: RequestFilter) -> Result<PageSession, NavigationError>;
}

/// 页面会话
///
/// 包装一次浏览器会话的生命周期。`close` 消费自身，
/// 由提取辅助函数保证在成功与每条失败路径上都被调用一次。
pub struct PageSession {
    driver: Box<dyn PageDriver>,
}

impl PageSession {
    pub fn new(driver: Box<dyn PageDriver>) -> Self {
        Self { driver }
    }

    /// 导航并执行等待策略
    ///
    /// # 参数
    ///
    /// * `url` - 目标地址
    /// * `policy` - 等待策略
    /// * `timeout` - 导航与等待各自的超时上限
    ///
    /// # 返回值
    ///
    /// * `Ok(MarkerState)` - 导航成功，返回标记元素状态
    /// * `Err(NavigationError)` - 超时、网络失败或被目标拒绝
    pub async fn navigate_to(
        &mut self,
        url: &str,
        policy: &WaitPolicy,
        timeout: Duration,
    ) -> Result<MarkerState, NavigationError> {
        self.driver.navigate(url, timeout).await?;
        self.driver.wait_for(policy, timeout).await
    }

    /// 在页面上下文执行提取脚本并反序列化结果
    pub async fn extract<T: DeserializeOwned>(
        &mut self,
        expression: &str,
    ) -> Result<T, NavigationError> {
        let value = self.driver.evaluate(expression).await?;
        serde_json::from_value(value).map_err(|e| {
            NavigationError::NetworkFailure(format!("unexpected extraction shape: {e}"))
        })
    }

    /// 关闭会话
    pub async fn close(self) {
        self.driver.close().await;
    }
}
