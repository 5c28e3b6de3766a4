// Copyright (c) 2025 fanmetrics
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::aggregator::ScrapeOrchestrator;
use crate::browser::SessionFactory;
use crate::config::settings::Settings;
use crate::domain::identity::Identity;
use crate::domain::payload::{BasicStats, CatalogStats, SourceFailure, SourcePayload};
use crate::presentation::errors::AppError;
use crate::sources::engagement::{EngagementPlatform, EngagementRate};
use crate::sources::instagram::InstagramProfile;
use crate::sources::spotify::SpotifyCatalog;
use crate::sources::tiktok::TikTokProfile;
use crate::sources::SourceExtractor;

/// 基础统计操作
///
/// `GET /v1/stats/{source}/{handle}`，source 取 tiktok 或 instagram。
/// 主页统计与互动率并发抓取；互动率失败时降级为 "N/A"。
pub async fn get_basic_stats(
    Path((source, handle)): Path<(String, String)>,
    Extension(settings): Extension<Arc<Settings>>,
    Extension(factory): Extension<Arc<dyn SessionFactory>>,
) -> Result<Json<BasicStats>, AppError> {
    let identity = Identity::handle(&handle)?;
    info!("Basic stats request: source={} identity={:?}", source, identity);

    let (primary, engagement): (Arc<dyn SourceExtractor>, Arc<dyn SourceExtractor>) =
        match source.as_str() {
            "tiktok" => (
                Arc::new(TikTokProfile::new(Arc::clone(&factory), &settings)),
                Arc::new(EngagementRate::new(
                    Arc::clone(&factory),
                    EngagementPlatform::TikTok,
                    &settings,
                )),
            ),
            "instagram" => (
                Arc::new(InstagramProfile::new(Arc::clone(&factory), &settings)),
                Arc::new(EngagementRate::new(
                    Arc::clone(&factory),
                    EngagementPlatform::Instagram,
                    &settings,
                )),
            ),
            other => return Err(AppError::unknown_source(other)),
        };

    let stats = ScrapeOrchestrator::basic_stats(primary, engagement, &identity).await?;
    Ok(Json(stats))
}

/// 曲目统计查询参数
#[derive(Debug, Deserialize)]
pub struct TrackStatsQuery {
    /// 目标曲目目录页URL
    pub url: String,
}

/// 曲目统计操作
///
/// `GET /v1/tracks?url=...`
pub async fn get_track_stats(
    Query(query): Query<TrackStatsQuery>,
    Extension(settings): Extension<Arc<Settings>>,
    Extension(factory): Extension<Arc<dyn SessionFactory>>,
) -> Result<Json<CatalogStats>, AppError> {
    let identity = Identity::locator(&query.url)?;
    info!("Track stats request: locator={}", query.url);

    let extractor = SpotifyCatalog::new(factory, &settings);
    match extractor.run(&identity).await {
        Ok(SourcePayload::Catalog(stats)) => Ok(Json(stats)),
        Ok(_) => Err(AppError::internal("unexpected payload shape")),
        Err(error) => Err(AppError::from(SourceFailure::from(&error))),
    }
}
