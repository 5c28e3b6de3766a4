// Copyright (c) 2025 fanmetrics
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 身份模块
///
/// 艺术家身份的归一化表示
pub mod identity;

/// 指标模块
///
/// 区分精确数值与“不可用”的指标类型
pub mod metric;

/// 载荷模块
///
/// 各数据源的结果载荷与聚合响应
pub mod payload;
