// Copyright (c) 2025 fanmetrics
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::metric::{ser_text, Metric};

/// 个人主页统计
///
/// 与原有消费端约定的线格式保持一致（camelCase，缺失文本为 "N/A"）
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    /// 平台名称
    pub platform: &'static str,
    /// 页面展示的句柄
    #[serde(serialize_with = "ser_text")]
    pub handle: Option<String>,
    /// 主页地址
    pub profile_url: String,
    /// 粉丝数
    pub followers: Metric,
    /// 获赞总数（TikTok）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_likes: Option<Metric>,
    /// 帖子总数（Instagram）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_posts: Option<Metric>,
    /// 头像地址
    #[serde(serialize_with = "ser_text")]
    pub profile_pic: Option<String>,
}

/// 互动率统计
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementStats {
    /// 互动率展示值（如 "4.2%"），不可用时为 "N/A"
    #[serde(serialize_with = "ser_text")]
    pub engagement_rate: Option<String>,
}

/// 单曲统计
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackStat {
    #[serde(serialize_with = "ser_text")]
    pub track_name: Option<String>,
    pub streams: Metric,
}

/// 曲目目录页统计
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    #[serde(serialize_with = "ser_text")]
    pub name: Option<String>,
    pub monthly_listeners: Metric,
    pub top_tracks: Vec<TrackStat>,
}

/// 数据源载荷
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SourcePayload {
    Profile(ProfileStats),
    Engagement(EngagementStats),
    Catalog(CatalogStats),
}

/// 数据源失败描述
///
/// `code` 为稳定错误码，供消费端编程判断；`message` 面向人类
#[derive(Debug, Clone, Serialize)]
pub struct SourceFailure {
    pub code: &'static str,
    pub message: String,
}

impl SourceFailure {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL",
            message: message.into(),
        }
    }
}

/// 单数据源结果
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SourceResult {
    Success { payload: SourcePayload },
    Failure { error: SourceFailure },
}

impl SourceResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SourceResult::Success { .. })
    }
}

/// 聚合响应
///
/// 数据源名称到其结果的映射，构造后不可变
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct AggregateResponse {
    entries: BTreeMap<String, SourceResult>,
}

impl AggregateResponse {
    pub fn new(entries: BTreeMap<String, SourceResult>) -> Self {
        Self { entries }
    }

    pub fn get(&self, source: &str) -> Option<&SourceResult> {
        self.entries.get(source)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.entries.values().filter(|r| r.is_success()).count()
    }

    /// 拆出各条目用于终态折叠
    pub fn into_entries(self) -> BTreeMap<String, SourceResult> {
        self.entries
    }
}

/// 基础统计组合响应（主页 + 互动率）
#[derive(Debug, Clone, Serialize)]
pub struct BasicStats {
    pub data: SourcePayload,
    pub engagement: EngagementStats,
}
