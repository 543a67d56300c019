//! Remote icon tests against a local HTTP server.
//!
//! Tests verify:
//! - Remote icons are fetched and rendered
//! - Error statuses, oversized bodies and timeouts fall back to the placeholder
//! - Unsupported references never reach the network

use std::sync::atomic::Ordering;
use std::time::Duration;

use axum::http::StatusCode;
use httpmock::prelude::*;

use app_icon_server::io::HttpFetcher;
use app_icon_server::render::{IconOrigin, IconRequest, IconService, IconSize, PlaceholderGenerator};
use app_icon_server::store::MemoryApplicationStore;
use app_icon_server::{create_router, RouterConfig};

use super::test_utils::{decode_png, doc_with_icon, get, solid_jpeg, solid_png, MockFetcher};

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(Duration::from_millis(500), 64 * 1024).unwrap()
}

#[tokio::test]
async fn test_remote_png_icon() {
    let server = MockServer::start();
    let icon_mock = server.mock(|when, then| {
        when.method(GET).path("/assets/icon.png");
        then.status(200)
            .header("Content-Type", "image/png")
            .body(solid_png(48, 48, [12, 34, 56, 255]));
    });

    let store = MemoryApplicationStore::new()
        .with_document("app", doc_with_icon(&server.url("/assets/icon.png")));
    let router = create_router(IconService::new(store, fetcher()), RouterConfig::new());

    let (status, headers, body) = get(router, "/api/v1/applications/app/icons/192.png").await;

    icon_mock.assert();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get("x-icon-source").unwrap(), "remote");

    let img = decode_png(&body);
    assert_eq!(img.dimensions(), (192, 192));
    assert_eq!(img.get_pixel(96, 96).0, [12, 34, 56, 255]);
}

#[tokio::test]
async fn test_remote_jpeg_with_misleading_content_type() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/logo");
        then.status(200)
            .header("Content-Type", "application/octet-stream")
            .body(solid_jpeg(80, 40, [200, 200, 200]));
    });

    let store =
        MemoryApplicationStore::new().with_document("app", doc_with_icon(&server.url("/logo")));
    let service = IconService::new(store, fetcher());

    let icon = service
        .render_icon(&IconRequest::new("app", IconSize::Px512))
        .await;
    assert_eq!(icon.origin, IconOrigin::Remote);

    let img = decode_png(&icon.data);
    assert_eq!(img.dimensions(), (512, 512));
    assert_eq!(img.get_pixel(256, 0)[3], 0);
    assert_eq!(img.get_pixel(256, 256)[3], 255);
}

#[tokio::test]
async fn test_remote_failures_fall_back() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/missing.png");
        then.status(404);
    });
    server.mock(|when, then| {
        when.method(GET).path("/html.png");
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<html>not an image</html>");
    });
    server.mock(|when, then| {
        when.method(GET).path("/huge.png");
        then.status(200).body(vec![0u8; 128 * 1024]);
    });
    server.mock(|when, then| {
        when.method(GET).path("/slow.png");
        then.status(200)
            .body(solid_png(8, 8, [1, 1, 1, 255]))
            .delay(Duration::from_secs(3));
    });

    let store = MemoryApplicationStore::new()
        .with_document("missing", doc_with_icon(&server.url("/missing.png")))
        .with_document("html", doc_with_icon(&server.url("/html.png")))
        .with_document("huge", doc_with_icon(&server.url("/huge.png")))
        .with_document("slow", doc_with_icon(&server.url("/slow.png")))
        .with_document("refused", doc_with_icon("http://127.0.0.1:1/icon.png"));
    let service = IconService::new(store, fetcher());

    let expected = PlaceholderGenerator::new().generate(192);
    for id in ["missing", "html", "huge", "slow", "refused"] {
        let icon = service
            .render_icon(&IconRequest::new(id, IconSize::Px192))
            .await;
        assert_eq!(icon.origin, IconOrigin::Placeholder, "{id}");
        assert_eq!(icon.data, expected, "{id}");
    }
}

#[tokio::test]
async fn test_remote_redirect_followed() {
    let server = MockServer::start();
    let redirect_mock = server.mock(|when, then| {
        when.method(GET).path("/old.png");
        then.status(302).header("Location", "/new.png");
    });
    server.mock(|when, then| {
        when.method(GET).path("/new.png");
        then.status(200).body(solid_png(2, 2, [0, 0, 0, 255]));
    });

    let store =
        MemoryApplicationStore::new().with_document("app", doc_with_icon(&server.url("/old.png")));
    let service = IconService::new(store, fetcher());

    let icon = service
        .render_icon(&IconRequest::new("app", IconSize::Px192))
        .await;
    redirect_mock.assert();
    assert_eq!(icon.origin, IconOrigin::Remote);
}

#[tokio::test]
async fn test_unsupported_references_never_fetch() {
    let fetcher = MockFetcher::new();
    let calls = fetcher.counter();

    let store = MemoryApplicationStore::new()
        .with_document("ftp", doc_with_icon("ftp://example.com/icon.png"))
        .with_document("file", doc_with_icon("file:///etc/passwd"))
        .with_document("relative", doc_with_icon("/static/icon.png"));
    let service = IconService::new(store, fetcher);

    for id in ["ftp", "file", "relative"] {
        let icon = service
            .render_icon(&IconRequest::new(id, IconSize::Px192))
            .await;
        assert_eq!(icon.origin, IconOrigin::Placeholder);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_mock_fetcher_called_once_per_request() {
    let url = "https://cdn.example.com/icon.png";
    let fetcher = MockFetcher::new().with_body(url, solid_png(16, 16, [5, 5, 5, 255]));
    let calls = fetcher.counter();

    let store = MemoryApplicationStore::new().with_document("app", doc_with_icon(url));
    let service = IconService::new(store, fetcher);

    for _ in 0..3 {
        let icon = service
            .render_icon(&IconRequest::new("app", IconSize::Px512))
            .await;
        assert_eq!(icon.origin, IconOrigin::Remote);
    }

    // Nothing is cached between requests
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}
