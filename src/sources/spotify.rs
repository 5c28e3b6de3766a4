// Copyright (c) 2025 fanmetrics
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::browser::{SessionFactory, WaitPolicy};
use crate::config::settings::Settings;
use crate::domain::identity::Identity;
use crate::domain::metric::Metric;
use crate::domain::payload::{CatalogStats, SourcePayload, TrackStat};
use crate::sources::{harvest, ExtractError, PageTask, SourceExtractor};

const MARKER: &str = "h1[data-testid=\"entityTitle\"]";

const EXTRACTION_SCRIPT: &str = r#"
(() => {
    const text = (el) => (el ? el.innerText.trim() : null);
    const name = text(document.querySelector('h1[data-testid="entityTitle"]'));
    const listeners = text(document.querySelector('span[class*="monthly listeners"]'));
    const topTracks = Array.from(
        document.querySelectorAll('div[role="gridcell"][aria-colindex="3"] div[data-encore-id="text"]')
    ).map((el) => {
        const row = el.closest('div[role="row"]');
        const link = row ? row.querySelector('a[data-testid="internal-track-link"]') : null;
        return { trackName: text(link), streams: text(el) };
    });
    return { name: name, monthlyListeners: listeners, topTracks: topTracks };
})()
"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCatalog {
    name: Option<String>,
    monthly_listeners: Option<String>,
    #[serde(default)]
    top_tracks: Vec<RawTrack>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTrack {
    track_name: Option<String>,
    streams: Option<String>,
}

/// Spotify曲目目录提取器
///
/// 目标地址由调用方提供（定位符身份），不走句柄模板
pub struct SpotifyCatalog {
    factory: Arc<dyn SessionFactory>,
    timeout: Duration,
}

impl SpotifyCatalog {
    pub fn new(factory: Arc<dyn SessionFactory>, settings: &Settings) -> Self {
        Self {
            factory,
            timeout: settings.scrape.catalog_timeout(),
        }
    }
}

#[async_trait]
impl SourceExtractor for SpotifyCatalog {
    fn name(&self) -> &'static str {
        "spotify"
    }

    async fn run(&self, identity: &Identity) -> Result<SourcePayload, ExtractError> {
        let url = identity
            .locator_url()
            .map(|u| u.to_string())
            .unwrap_or_default();

        let raw: RawCatalog = harvest(
            self.factory.as_ref(),
            PageTask {
                url,
                wait: WaitPolicy::Selector(MARKER),
                timeout: self.timeout,
                deny_patterns: &[],
                script: EXTRACTION_SCRIPT,
            },
        )
        .await?;

        Ok(SourcePayload::Catalog(CatalogStats {
            name: raw.name,
            monthly_listeners: Metric::from_raw(raw.monthly_listeners.as_deref()),
            top_tracks: raw
                .top_tracks
                .into_iter()
                .map(|track| TrackStat {
                    track_name: track.track_name,
                    streams: Metric::from_raw(track.streams.as_deref()),
                })
                .collect(),
        }))
    }
}
