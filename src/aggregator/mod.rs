// Copyright (c) 2025 fanmetrics
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use futures::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::identity::Identity;
use crate::domain::payload::{
    AggregateResponse, BasicStats, EngagementStats, SourceFailure, SourcePayload, SourceResult,
};
use crate::sources::SourceExtractor;

/// 聚合错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregationError {
    /// 所有被请求的数据源均失败
    #[error("all requested sources failed: {}", sources.join(", "))]
    PartialFailure { sources: Vec<String> },
}

/// 抓取编排器
///
/// 对每个数据源派发一个独立任务并发执行，等待全部到达终态
/// （settle-all，而非fail-fast）后再组装响应；任何单源失败都被
/// 包装为 `SourceResult::Failure`，不会中断兄弟任务。
pub struct ScrapeOrchestrator {
    sources: Vec<Arc<dyn SourceExtractor>>,
}

impl ScrapeOrchestrator {
    pub fn new(sources: Vec<Arc<dyn SourceExtractor>>) -> Self {
        Self { sources }
    }

    /// 聚合全部数据源
    ///
    /// # 参数
    ///
    /// * `identity` - 归一化后的艺术家身份
    ///
    /// # 返回值
    ///
    /// * `Ok(AggregateResponse)` - 至少一个数据源成功
    /// * `Err(AggregationError)` - 所有数据源均失败
    pub async fn aggregate(&self, identity: &Identity) -> Result<AggregateResponse, AggregationError> {
        let handles: Vec<_> = self
            .sources
            .iter()
            .map(|source| {
                let source = Arc::clone(source);
                let identity = identity.clone();
                // One spawned task per source: a panic inside an extractor is
                // contained by the JoinHandle instead of unwinding through
                // the aggregation.
                tokio::spawn(async move {
                    let outcome = source.run(&identity).await;
                    (source.name(), outcome)
                })
            })
            .collect();

        let mut entries = BTreeMap::new();
        let mut failed = Vec::new();
        for (index, joined) in join_all(handles).await.into_iter().enumerate() {
            let (name, result) = match joined {
                Ok((name, Ok(payload))) => {
                    info!("Source {} succeeded", name);
                    (name.to_string(), SourceResult::Success { payload })
                }
                Ok((name, Err(error))) => {
                    warn!("Source {} failed: {}", name, error);
                    (
                        name.to_string(),
                        SourceResult::Failure {
                            error: SourceFailure::from(&error),
                        },
                    )
                }
                Err(join_error) => {
                    let name = self.sources[index].name().to_string();
                    warn!("Source {} task aborted: {}", name, join_error);
                    (
                        name,
                        SourceResult::Failure {
                            error: SourceFailure::internal(join_error.to_string()),
                        },
                    )
                }
            };
            if !result.is_success() {
                failed.push(name.clone());
            }
            entries.insert(name, result);
        }

        if !entries.is_empty() && failed.len() == entries.len() {
            return Err(AggregationError::PartialFailure { sources: failed });
        }
        Ok(AggregateResponse::new(entries))
    }

    /// 组合抓取：主页统计 + 互动率
    ///
    /// 两路提取并发派发。主源失败则整个条目失败；
    /// 副源失败仅将互动率降级为“不可用”，不会掩盖主结果。
    ///
    /// # 参数
    ///
    /// * `primary` - 主页数据源
    /// * `engagement` - 互动率数据源
    /// * `identity` - 归一化后的艺术家身份
    pub async fn basic_stats(
        primary: Arc<dyn SourceExtractor>,
        engagement: Arc<dyn SourceExtractor>,
        identity: &Identity,
    ) -> Result<BasicStats, BasicStatsError> {
        let primary_name = primary.name();
        let engagement_name = engagement.name();

        let orchestrator = ScrapeOrchestrator::new(vec![primary, engagement]);
        let response = match orchestrator.aggregate(identity).await {
            Ok(response) => response,
            Err(error) => return Err(BasicStatsError::AllFailed(error)),
        };

        let mut entries = response.into_entries();
        let data = match entries.remove(primary_name) {
            Some(SourceResult::Success { payload }) => payload,
            Some(SourceResult::Failure { error }) => return Err(BasicStatsError::Primary(error)),
            None => {
                return Err(BasicStatsError::Primary(SourceFailure::internal(
                    "primary source missing from aggregate response",
                )))
            }
        };

        let engagement_rate = match entries.remove(engagement_name) {
            Some(SourceResult::Success {
                payload: SourcePayload::Engagement(stats),
            }) => stats.engagement_rate,
            Some(SourceResult::Failure { error }) => {
                warn!(
                    "Engagement source {} unavailable: {}",
                    engagement_name, error.message
                );
                None
            }
            _ => None,
        };

        Ok(BasicStats {
            data,
            engagement: EngagementStats { engagement_rate },
        })
    }
}

/// 组合抓取错误
#[derive(Error, Debug)]
pub enum BasicStatsError {
    /// 主源失败（带稳定错误码）
    #[error("{}", .0.message)]
    Primary(SourceFailure),
    /// 两路均失败
    #[error(transparent)]
    AllFailed(#[from] AggregationError),
}
