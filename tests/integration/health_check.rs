// Copyright (c) 2025 fanmetrics
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;

use super::helpers::test_app;

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::new(test_app()).unwrap();
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn test_version_reports_crate_version() {
    let server = TestServer::new(test_app()).unwrap();
    let response = server.get("/v1/version").await;
    response.assert_status_ok();
    assert_eq!(response.text(), env!("CARGO_PKG_VERSION"));
}
