// Copyright (c) 2025 fanmetrics
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::browser::{SessionFactory, WaitPolicy};
use crate::config::settings::Settings;
use crate::domain::identity::Identity;
use crate::domain::metric::Metric;
use crate::domain::payload::{ProfileStats, SourcePayload};
use crate::sources::{harvest, ExtractError, PageTask, SourceExtractor};

const MARKER: &str = "meta[property=\"og:description\"]";

const DENY_PATTERNS: &[&str] = &["login"];

// Instagram renders the interesting counts into the og:description meta tag;
// the tag content is parsed on the Rust side.
const EXTRACTION_SCRIPT: &str = r#"
(() => {
    const meta = document.querySelector('meta[property="og:description"]');
    const pic = document.querySelector('img[alt*="profile picture"]');
    return {
        description: meta ? meta.content : null,
        profilePic: pic ? pic.getAttribute('src') : null,
    };
})()
"#;

static FOLLOWERS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([\d.,]+[KM]?)\s+Followers").expect("static regex"));
static POSTS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([\d.,]+[KM]?)\s+Posts").expect("static regex"));

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMeta {
    description: Option<String>,
    profile_pic: Option<String>,
}

/// Instagram主页提取器
pub struct InstagramProfile {
    factory: Arc<dyn SessionFactory>,
    timeout: Duration,
}

impl InstagramProfile {
    pub fn new(factory: Arc<dyn SessionFactory>, settings: &Settings) -> Self {
        Self {
            factory,
            timeout: settings.scrape.profile_timeout(),
        }
    }

    fn profile_url(handle: &str) -> String {
        format!("https://www.instagram.com/{handle}/")
    }
}

fn capture_count(re: &Regex, description: Option<&str>) -> Metric {
    let raw = description.and_then(|text| {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    });
    Metric::from_raw(raw.as_deref())
}

#[async_trait]
impl SourceExtractor for InstagramProfile {
    fn name(&self) -> &'static str {
        "instagram"
    }

    async fn run(&self, identity: &Identity) -> Result<SourcePayload, ExtractError> {
        let handle = identity.handle_str().unwrap_or_default();
        let url = Self::profile_url(handle);

        let raw: RawMeta = harvest(
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

        let description = raw.description.as_deref();
        Ok(SourcePayload::Profile(ProfileStats {
            platform: "Instagram",
            handle: Some(handle.to_string()),
            profile_url: url,
            followers: capture_count(&FOLLOWERS_RE, description),
            total_likes: None,
            total_posts: Some(capture_count(&POSTS_RE, description)),
            profile_pic: raw.profile_pic,
        }))
    }
}
