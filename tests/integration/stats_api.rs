// Copyright (c) 2025 fanmetrics
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;
use serde_json::Value;

use super::helpers::test_app;

#[tokio::test]
async fn test_blank_handle_is_rejected() {
    let server = TestServer::new(test_app()).unwrap();
    // "%40" decodes to "@"; normalization strips it down to nothing.
    let response = server.get("/v1/stats/tiktok/%40").await;
    response.assert_status_bad_request();

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "INVALID_IDENTITY");
}

#[tokio::test]
async fn test_unknown_source_is_rejected() {
    let server = TestServer::new(test_app()).unwrap();
    let response = server.get("/v1/stats/myspace/someartist").await;
    response.assert_status_bad_request();

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "UNKNOWN_SOURCE");
}

#[tokio::test]
async fn test_malformed_track_locator_is_rejected() {
    let server = TestServer::new(test_app()).unwrap();
    let response = server.get("/v1/tracks").add_query_param("url", "notaurl").await;
    response.assert_status_bad_request();

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_LOCATOR");
}

#[tokio::test]
async fn test_non_http_track_locator_is_rejected() {
    let server = TestServer::new(test_app()).unwrap();
    let response = server
        .get("/v1/tracks")
        .add_query_param("url", "ftp://open.spotify.com/artist/abc")
        .await;
    response.assert_status_bad_request();

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_LOCATOR");
}

#[tokio::test]
async fn test_stats_with_unreachable_browser_reports_gateway_failure() {
    let server = TestServer::new(test_app()).unwrap();
    // Both the profile and the engagement source fail to open a session,
    // so the whole scrape collapses rather than degrading.
    let response = server.get("/v1/stats/tiktok/exampleartist").await;
    response.assert_status(axum::http::StatusCode::BAD_GATEWAY);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "ALL_SOURCES_FAILED");
}

#[tokio::test]
async fn test_tracks_with_unreachable_browser_reports_gateway_failure() {
    let server = TestServer::new(test_app()).unwrap();
    let response = server
        .get("/v1/tracks")
        .add_query_param("url", "https://open.spotify.com/artist/abc123")
        .await;
    response.assert_status(axum::http::StatusCode::BAD_GATEWAY);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "NETWORK_FAILURE");
}
