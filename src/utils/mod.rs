// Copyright (c) 2025 fanmetrics
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数字归一化模块
///
/// 将 "12.3K" 等缩写计数解析为精确数值
pub mod numbers;

/// 遥测模块
pub mod telemetry;

/// 校验模块
///
/// 提供外部资源定位符的格式校验
pub mod validators;
