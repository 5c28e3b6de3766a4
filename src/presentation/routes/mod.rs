// Copyright (c) 2025 fanmetrics
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{routing::get, Extension, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::browser::SessionFactory;
use crate::config::settings::Settings;
use crate::presentation::handlers::stats_handler;

/// 创建应用路由
///
/// # 参数
///
/// * `settings` - 应用配置
/// * `factory` - 会话工厂
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(settings: Arc<Settings>, factory: Arc<dyn SessionFactory>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version))
        .route(
            "/v1/stats/{source}/{handle}",
            get(stats_handler::get_basic_stats),
        )
        .route("/v1/tracks", get(stats_handler::get_track_stats))
        .layer(Extension(settings))
        .layer(Extension(factory))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
