// Copyright (c) 2025 fanmetrics
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::fetch::{
    ContinueRequestParams, EnableParams, EventRequestPaused, FailRequestParams,
};
use chromiumoxide::cdp::browser_protocol::network::{ErrorReason, ResourceType};
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::browser::request_filter::{FilterDecision, NavigationRequest, RequestFilter};
use crate::browser::{MarkerState, NavigationError, PageDriver, PageSession, SessionFactory, WaitPolicy};
use crate::config::settings::BrowserSettings;

const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(250);

// Scrubs the most common automation tell before any page script runs.
const STEALTH_INIT: &str =
    "Object.defineProperty(navigator, 'webdriver', { get: () => undefined });";

/// Chromium会话工厂
///
/// 每次 `open` 启动（或连接到）一个独立的Chromium实例并返回独占会话；
/// 不保留进程级浏览器单例。
pub struct ChromiumFactory {
    settings: BrowserSettings,
}

impl ChromiumFactory {
    pub fn new(settings: BrowserSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl SessionFactory for ChromiumFactory {
    async fn open(&self, filter: RequestFilter) -> Result<PageSession, NavigationError> {
        let driver = ChromiumDriver::open(&self.settings, filter).await?;
        Ok(PageSession::new(Box::new(driver)))
    }
}

/// Chromium页面驱动
///
/// 实现 navigate/wait/evaluate/close 契约；会话打开期间通过
/// CDP Fetch 域把出站请求交给 [`RequestFilter`] 谓词裁决。
pub struct ChromiumDriver {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    intercept_task: JoinHandle<()>,
    remote: bool,
}

impl ChromiumDriver {
    /// 打开新会话
    ///
    /// # 参数
    ///
    /// * `settings` - 浏览器配置
    /// * `filter` - 会话内生效的导航过滤器
    pub async fn open(
        settings: &BrowserSettings,
        filter: RequestFilter,
    ) -> Result<Self, NavigationError> {
        let remote = settings.remote_debugging_url.is_some();
        let (browser, mut handler) = if let Some(url) = &settings.remote_debugging_url {
            debug!("Connecting to remote Chromium at {}", url);
            Browser::connect(url)
                .await
                .map_err(|e| NavigationError::NetworkFailure(e.to_string()))?
        } else {
            let config = BrowserConfig::builder()
                .no_sandbox()
                .request_timeout(settings.nav_timeout())
                .arg("--disable-blink-features=AutomationControlled")
                .arg("--disable-gpu")
                .arg("--disable-dev-shm-usage")
                .build()
                .map_err(NavigationError::NetworkFailure)?;
            Browser::launch(config)
                .await
                .map_err(|e| NavigationError::NetworkFailure(e.to_string()))?
        };

        // Drive browser events until the connection ends.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| NavigationError::NetworkFailure(e.to_string()))?;

        // Outbound identity plus automation-detection countermeasures. Every
        // extractor relies on these being in place before the first navigation.
        page.set_user_agent(settings.user_agent.as_str())
            .await
            .map_err(|e| NavigationError::NetworkFailure(e.to_string()))?;
        page.execute(AddScriptToEvaluateOnNewDocumentParams::new(STEALTH_INIT))
            .await
            .map_err(|e| NavigationError::NetworkFailure(e.to_string()))?;

        let intercept_task = Self::spawn_interceptor(&page, filter).await?;

        Ok(Self {
            browser,
            page,
            handler_task,
            intercept_task,
            remote,
        })
    }

    /// 启动请求拦截任务
    ///
    /// 每个被暂停的请求交给过滤谓词同步裁决：
    /// 拒绝则以 Aborted 失败该请求，其余继续。
    async fn spawn_interceptor(
        page: &Page,
        filter: RequestFilter,
    ) -> Result<JoinHandle<()>, NavigationError> {
        let mut paused_requests = page
            .event_listener::<EventRequestPaused>()
            .await
            .map_err(|e| NavigationError::NetworkFailure(e.to_string()))?;
        page.execute(EnableParams::default())
            .await
            .map_err(|e| NavigationError::NetworkFailure(e.to_string()))?;

        let page = page.clone();
        Ok(tokio::spawn(async move {
            while let Some(event) = paused_requests.next().await {
                let request = NavigationRequest {
                    url: event.request.url.clone(),
                    is_navigation: matches!(event.resource_type, ResourceType::Document),
                };
                let request_id = event.request_id.clone();
                let outcome = match filter.decide(&request) {
                    FilterDecision::Abort => {
                        warn!("Blocked sub-navigation to {}", request.url);
                        page.execute(FailRequestParams::new(request_id, ErrorReason::Aborted))
                            .await
                            .map(drop)
                    }
                    FilterDecision::Allow => page
                        .execute(ContinueRequestParams::new(request_id))
                        .await
                        .map(drop),
                };
                if outcome.is_err() {
                    // Session is tearing down; stop consuming events.
                    break;
                }
            }
        }))
    }
}

#[async_trait]
impl PageDriver for ChromiumDriver {
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), NavigationError> {
        debug!("Navigating to {}", url);
        match tokio::time::timeout(timeout, self.page.goto(url)).await {
            Err(_) => Err(NavigationError::Timeout),
            Ok(Err(e)) => Err(classify_goto_error(e.to_string())),
            Ok(Ok(_)) => Ok(()),
        }
    }

    async fn wait_for(
        &self,
        policy: &WaitPolicy,
        timeout: Duration,
    ) -> Result<MarkerState, NavigationError> {
        match policy {
            WaitPolicy::NetworkIdle { settle } => {
                // goto already waited for the load event; give late XHRs a moment.
                let _ = tokio::time::timeout(timeout, self.page.wait_for_navigation()).await;
                tokio::time::sleep(*settle).await;
                Ok(MarkerState::Satisfied)
            }
            WaitPolicy::Selector(selector) => {
                let deadline = Instant::now() + timeout;
                loop {
                    if self.page.find_element(*selector).await.is_ok() {
                        return Ok(MarkerState::Satisfied);
                    }
                    if Instant::now() >= deadline {
                        return Ok(MarkerState::Missing(selector));
                    }
                    tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
                }
            }
        }
    }

    async fn evaluate(&self, expression: &str) -> Result<serde_json::Value, NavigationError> {
        let result = self
            .page
            .evaluate(expression)
            .await
            .map_err(|e| NavigationError::NetworkFailure(e.to_string()))?;
        result
            .into_value()
            .map_err(|e| NavigationError::NetworkFailure(format!("evaluation result: {e}")))
    }

    async fn close(self: Box<Self>) {
        let ChromiumDriver {
            mut browser,
            page,
            handler_task,
            intercept_task,
            remote,
        } = *self;

        intercept_task.abort();
        if let Err(e) = page.close().await {
            debug!("Page close failed: {}", e);
        }
        if remote {
            // The remote instance outlives us; only the page was ours.
            handler_task.abort();
            return;
        }
        if let Err(e) = browser.close().await {
            debug!("Browser close failed: {}", e);
        }
        // The handler drains to completion once the browser process exits.
        let _ = tokio::time::timeout(Duration::from_secs(5), handler_task).await;
    }
}

/// 对goto失败分类
///
/// 连接/DNS层失败归为 NetworkFailure，被目标拒绝归为 Blocked，
/// 底层超时归为 Timeout。
fn classify_goto_error(message: String) -> NavigationError {
    if message.contains("ERR_NAME_NOT_RESOLVED")
        || message.contains("ERR_CONNECTION")
        || message.contains("ERR_INTERNET_DISCONNECTED")
        || message.contains("ERR_PROXY")
    {
        return NavigationError::NetworkFailure(message);
    }
    if message.contains("ERR_BLOCKED")
        || message.contains("ERR_ABORTED")
        || message.contains("ERR_HTTP_RESPONSE_CODE_FAILURE")
    {
        return NavigationError::Blocked(message);
    }
    if message.to_lowercase().contains("timeout") {
        return NavigationError::Timeout;
    }
    NavigationError::NetworkFailure(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goto_error_classification() {
        let network = classify_goto_error("net::ERR_NAME_NOT_RESOLVED".to_string());
        assert!(matches!(network, NavigationError::NetworkFailure(_)));

        let blocked = classify_goto_error("net::ERR_BLOCKED_BY_RESPONSE".to_string());
        assert!(matches!(blocked, NavigationError::Blocked(_)));

        let timeout = classify_goto_error("Request timeout".to_string());
        assert_eq!(timeout, NavigationError::Timeout);
    }
}
