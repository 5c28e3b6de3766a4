// Copyright (c) 2025 fanmetrics
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 统计处理器
///
/// 基础统计与曲目统计两个入站操作
pub mod stats_handler;
