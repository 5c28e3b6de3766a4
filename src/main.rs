// Copyright (c) 2025 fanmetrics
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use fanmetrics::browser::chromium::ChromiumFactory;
use fanmetrics::browser::SessionFactory;
use fanmetrics::config::settings::Settings;
use fanmetrics::presentation::routes;
use fanmetrics::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting fanmetrics...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Session factory: one owned browser session per scrape, no singleton
    let factory: Arc<dyn SessionFactory> =
        Arc::new(ChromiumFactory::new(settings.browser.clone()));

    // 4. Start HTTP server
    let app = routes::routes(settings.clone(), factory);
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
