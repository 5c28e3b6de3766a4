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
use crate::domain::payload::{ProfileStats, SourcePayload};
use crate::sources::{harvest, ExtractError, PageTask, SourceExtractor};

const MARKER: &str = "[data-e2e=\"followers-count\"]";

const DENY_PATTERNS: &[&str] = &["login"];

// Everything optional: only the marker element is mandatory, and that is
// enforced by the wait policy before this script runs.
const EXTRACTION_SCRIPT: &str = r#"
(() => {
    const text = (sel) => {
        const el = document.querySelector(sel);
        return el ? el.innerText.trim() : null;
    };
    const avatar = document.querySelector('img[class*="ImgAvatar"]');
    return {
        handle: text('h1'),
        followers: text('[data-e2e="followers-count"]'),
        likes: text('[data-e2e="likes-count"]'),
        profilePic: avatar ? avatar.getAttribute('src') : null,
    };
})()
"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProfile {
    handle: Option<String>,
    followers: Option<String>,
    likes: Option<String>,
    profile_pic: Option<String>,
}

/// TikTok主页提取器
pub struct TikTokProfile {
    factory: Arc<dyn SessionFactory>,
    timeout: Duration,
}

impl TikTokProfile {
    pub fn new(factory: Arc<dyn SessionFactory>, settings: &Settings) -> Self {
        Self {
            factory,
            timeout: settings.scrape.profile_timeout(),
        }
    }

    fn profile_url(handle: &str) -> String {
        format!("https://www.tiktok.com/@{handle}")
    }
}

#[async_trait]
impl SourceExtractor for TikTokProfile {
    fn name(&self) -> &'static str {
        "tiktok"
    }

    async fn run(&self, identity: &Identity) -> Result<SourcePayload, ExtractError> {
        let handle = identity.handle_str().unwrap_or_default();
        let url = Self::profile_url(handle);

        let raw: RawProfile = harvest(
            self.factory.as_ref(),
            PageTask {
                url: url.clone(),
                wait: WaitPolicy::Selector(MARKER),
                timeout: self.timeout,
                deny_patterns: DENY_PATTERNS,
                script: EXTRACTION_SCRIPT,
            },
        )
        .await?;

        Ok(SourcePayload::Profile(ProfileStats {
            platform: "TikTok",
            handle: raw.handle,
            profile_url: url,
            followers: Metric::from_raw(raw.followers.as_deref()),
            total_likes: Some(Metric::from_raw(raw.likes.as_deref())),
            total_posts: None,
            profile_pic: raw.profile_pic,
        }))
    }
}
