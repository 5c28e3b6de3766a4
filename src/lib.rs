// Copyright (c) 2025 fanmetrics
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 聚合模块
///
/// 并发调度各数据源的抓取任务并合并结果
pub mod aggregator;

/// 浏览器模块
///
/// 封装无头浏览器会话的生命周期与导航过滤
pub mod browser;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含身份、指标和结果载荷等核心数据模型
pub mod domain;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由、处理器和错误映射
pub mod presentation;

/// 数据源模块
///
/// 每个外部平台一个提取器变体
pub mod sources;

/// 工具模块
///
/// 提供数字归一化、校验和遥测等辅助功能
pub mod utils;
