//! Filesystem store integration tests.
//!
//! Tests verify the full HTTP path over a directory of application records,
//! including published/editing precedence and broken records.

use std::path::Path;

use axum::http::StatusCode;
use axum::Router;
use serde_json::json;

use app_icon_server::render::{IconService, PlaceholderGenerator};
use app_icon_server::store::FsApplicationStore;
use app_icon_server::{create_router, RouterConfig};

use super::test_utils::{data_url, decode_png, doc_with_icon, get, solid_png, MockFetcher};

fn write_record(dir: &Path, id: &str, record: &serde_json::Value) {
    std::fs::write(
        dir.join(format!("{}.json", id)),
        serde_json::to_vec_pretty(record).unwrap(),
    )
    .unwrap();
}

fn fs_router(dir: &Path) -> Router {
    let service = IconService::new(FsApplicationStore::new(dir), MockFetcher::new());
    create_router(service, RouterConfig::new().with_tracing(false))
}

#[tokio::test]
async fn test_published_icon_wins_over_editing() {
    let dir = tempfile::tempdir().unwrap();
    let published = data_url("image/png", &solid_png(4, 4, [255, 0, 0, 255]));
    let editing = data_url("image/png", &solid_png(4, 4, [0, 0, 255, 255]));
    write_record(
        dir.path(),
        "app1",
        &json!({
            "published": doc_with_icon(&published),
            "editing": doc_with_icon(&editing)
        }),
    );

    let (status, headers, body) =
        get(fs_router(dir.path()), "/api/applications/app1/icons/192.png").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get("x-icon-source").unwrap(), "inline");
    assert_eq!(decode_png(&body).get_pixel(96, 96).0, [255, 0, 0, 255]);
}

#[tokio::test]
async fn test_editing_icon_when_never_published() {
    let dir = tempfile::tempdir().unwrap();
    let editing = data_url("image/png", &solid_png(4, 4, [0, 0, 255, 255]));
    write_record(
        dir.path(),
        "draft",
        &json!({ "published": null, "editing": doc_with_icon(&editing) }),
    );

    let (_, _, body) = get(fs_router(dir.path()), "/api/v1/applications/draft/icons/512.png").await;
    assert_eq!(decode_png(&body).get_pixel(256, 256).0, [0, 0, 255, 255]);
}

#[tokio::test]
async fn test_broken_records_fall_back() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("corrupt.json"), b"{ not json").unwrap();
    write_record(dir.path(), "empty", &json!({}));
    std::fs::create_dir(dir.path().join("folder.json")).unwrap();

    let router = fs_router(dir.path());
    let expected = PlaceholderGenerator::new().generate(192);

    for id in ["corrupt", "empty", "folder", "absent"] {
        let uri = format!("/api/v1/applications/{}/icons/192.png", id);
        let (status, headers, body) = get(router.clone(), &uri).await;

        assert_eq!(status, StatusCode::OK, "{id}");
        assert_eq!(headers.get("x-icon-source").unwrap(), "placeholder", "{id}");
        assert_eq!(body, expected, "{id}");
    }
}

#[tokio::test]
async fn test_missing_directory_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let router = fs_router(&dir.path().join("does-not-exist"));

    let (status, headers, _) = get(router, "/api/v1/applications/app1/icons/192.png").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get("x-icon-source").unwrap(), "placeholder");
}
