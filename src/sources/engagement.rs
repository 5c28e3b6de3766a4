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
use crate::domain::payload::{EngagementStats, SourcePayload};
use crate::sources::{harvest, ExtractError, PageTask, SourceExtractor};

// The calculator page has no stable marker; a missing card value is
// tolerated and degrades to an unavailable rate.
const EXTRACTION_SCRIPT: &str = r#"
(() => {
    const el = document.querySelector('div[class*="cardValue"] span');
    return { engagementRate: el ? el.innerText.trim() : null };
})()
"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEngagement {
    engagement_rate: Option<String>,
}

/// 互动率平台
#[derive(Debug, Clone, Copy)]
pub enum EngagementPlatform {
    TikTok,
    Instagram,
}

/// 互动率计算器提取器
///
/// 从第三方计算器页面按同一句柄读取衍生的互动率指标
pub struct EngagementRate {
    factory: Arc<dyn SessionFactory>,
    platform: EngagementPlatform,
    timeout: Duration,
    settle: Duration,
}

impl EngagementRate {
    pub fn new(
        factory: Arc<dyn SessionFactory>,
        platform: EngagementPlatform,
        settings: &Settings,
    ) -> Self {
        Self {
            factory,
            platform,
            timeout: settings.scrape.engagement_timeout(),
            settle: settings.browser.settle(),
        }
    }

    fn calculator_url(&self, handle: &str) -> String {
        match self.platform {
            EngagementPlatform::TikTok => format!(
                "https://www.modash.io/tiktok-engagement-rate-calculator?influencer=%40{handle}"
            ),
            EngagementPlatform::Instagram => {
                format!("https://www.modash.io/engagement-rate-calculator?influencer=%40{handle}")
            }
        }
    }
}

#[async_trait]
impl SourceExtractor for EngagementRate {
    fn name(&self) -> &'static str {
        match self.platform {
            EngagementPlatform::TikTok => "tiktok_engagement",
            EngagementPlatform::Instagram => "instagram_engagement",
        }
    }

    async fn run(&self, identity: &Identity) -> Result<SourcePayload, ExtractError> {
        let handle = identity.handle_str().unwrap_or_default();
        let url = self.calculator_url(handle);

        let raw: RawEngagement = harvest(
            self.factory.as_ref(),
            PageTask {
                url,
                wait: WaitPolicy::NetworkIdle {
                    settle: self.settle,
                },
                timeout: self.timeout,
                deny_patterns: &[],
                script: EXTRACTION_SCRIPT,
            },
        )
        .await?;

        Ok(SourcePayload::Engagement(EngagementStats {
            engagement_rate: raw.engagement_rate,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::testing::FakeFactory;
    use serde_json::json;

    #[tokio::test]
    async fn test_rate_passes_through_untouched() {
        let factory = Arc::new(FakeFactory::new(json!({ "engagementRate": "4.2%" })));
        let settings = Settings::new().unwrap();
        let extractor = EngagementRate::new(factory, EngagementPlatform::TikTok, &settings);

        let payload = extractor
            .run(&Identity::handle("exampleartist").unwrap())
            .await
            .unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["engagementRate"], "4.2%");
    }

    #[tokio::test]
    async fn test_missing_card_is_unavailable_not_error() {
        let factory = Arc::new(FakeFactory::new(json!({ "engagementRate": null })));
        let settings = Settings::new().unwrap();
        let extractor = EngagementRate::new(factory, EngagementPlatform::Instagram, &settings);

        let payload = extractor
            .run(&Identity::handle("exampleartist").unwrap())
            .await
            .unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["engagementRate"], "N/A");
    }

    #[test]
    fn test_platform_specific_urls() {
        let settings = Settings::new().unwrap();
        let factory = Arc::new(FakeFactory::new(json!({})));
        let tiktok = EngagementRate::new(factory.clone(), EngagementPlatform::TikTok, &settings);
        let insta = EngagementRate::new(factory, EngagementPlatform::Instagram, &settings);
        assert!(tiktok
            .calculator_url("x")
            .contains("tiktok-engagement-rate-calculator"));
        assert!(insta
            .calculator_url("x")
            .starts_with("https://www.modash.io/engagement-rate-calculator"));
    }
}
