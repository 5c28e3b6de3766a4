// Copyright (c) 2025 fanmetrics
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum::Router;
use std::sync::Arc;

use fanmetrics::browser::request_filter::RequestFilter;
use fanmetrics::browser::{NavigationError, PageSession, SessionFactory};
use fanmetrics::config::settings::Settings;
use fanmetrics::presentation::routes;

/// Session factory for handler tests that must never reach a browser.
/// Opening a session fails as if the network were down.
pub struct UnreachableFactory;

#[async_trait]
impl SessionFactory for UnreachableFactory {
    async fn open(&self, _filter: RequestFilter) -> Result<PageSession, NavigationError> {
        Err(NavigationError::NetworkFailure(
            "no browser available in tests".to_string(),
        ))
    }
}

pub fn test_app() -> Router {
    let settings = Arc::new(Settings::new().expect("default settings"));
    let factory: Arc<dyn SessionFactory> = Arc::new(UnreachableFactory);
    routes::routes(settings, factory)
}
