// Copyright (c) 2025 fanmetrics
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含服务器、浏览器和各数据源抓取超时等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 浏览器配置
    pub browser: BrowserSettings,
    /// 抓取配置
    pub scrape: ScrapeSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 浏览器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserSettings {
    /// 远程调试地址（设置后不在本地启动Chromium）
    pub remote_debugging_url: Option<String>,
    /// 出站客户端标识
    pub user_agent: String,
    /// 单次导航超时时间（秒）
    pub nav_timeout_secs: u64,
    /// 网络空闲等待后的稳定延迟（毫秒）
    pub settle_ms: u64,
}

impl BrowserSettings {
    pub fn nav_timeout(&self) -> Duration {
        Duration::from_secs(self.nav_timeout_secs)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

/// 抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeSettings {
    /// 个人主页抓取超时时间（秒）
    pub profile_timeout_secs: u64,
    /// 互动率计算器抓取超时时间（秒）
    pub engagement_timeout_secs: u64,
    /// 曲目目录页抓取超时时间（秒）
    pub catalog_timeout_secs: u64,
}

impl ScrapeSettings {
    pub fn profile_timeout(&self) -> Duration {
        Duration::from_secs(self.profile_timeout_secs)
    }

    pub fn engagement_timeout(&self) -> Duration {
        Duration::from_secs(self.engagement_timeout_secs)
    }

    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog_timeout_secs)
    }
}

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从默认值、可选配置文件和环境变量加载配置
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default browser settings
            .set_default("browser.user_agent", DEFAULT_USER_AGENT)?
            .set_default("browser.nav_timeout_secs", 30)?
            .set_default("browser.settle_ms", 1500)?
            // Default per-source timeouts
            .set_default("scrape.profile_timeout_secs", 30)?
            .set_default("scrape.engagement_timeout_secs", 20)?
            .set_default("scrape.catalog_timeout_secs", 30)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("FANMETRICS").separator("__"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load_without_files() {
        let settings = Settings::new().expect("defaults should satisfy every section");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.browser.nav_timeout_secs, 30);
        assert!(settings.browser.user_agent.contains("Mozilla/5.0"));
        assert_eq!(settings.scrape.engagement_timeout_secs, 20);
    }
}
