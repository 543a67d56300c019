//! End-to-end pipeline properties.
//!
//! Tests verify:
//! - Output is always exactly N×N
//! - Inline icons keep their aspect ratio and are centered
//! - Every failure mode yields the same placeholder bytes
//! - Repeated requests are byte-identical

use image::Rgba;
use serde_json::json;

use app_icon_server::render::{
    contain_fit, IconOrigin, IconRequest, IconService, IconSize, PlaceholderGenerator,
    PLACEHOLDER_BACKGROUND,
};
use app_icon_server::store::{ApplicationRecord, MemoryApplicationStore};

use super::test_utils::{
    data_url, decode_png, doc_with_icon, png_of, solid_jpeg, solid_png, FailingStore, MockFetcher,
};

async fn render(
    service: &IconService<MemoryApplicationStore, MockFetcher>,
    id: &str,
    size: IconSize,
) -> app_icon_server::RenderedIcon {
    service.render_icon(&IconRequest::new(id, size)).await
}

// =============================================================================
// Output Shape
// =============================================================================

#[tokio::test]
async fn test_output_is_square_for_all_sizes() {
    let wide = data_url("image/png", &solid_png(300, 40, [1, 1, 1, 255]));
    let tall = data_url("image/jpeg", &solid_jpeg(20, 200, [9, 9, 9]));
    let store = MemoryApplicationStore::new()
        .with_document("wide", doc_with_icon(&wide))
        .with_document("tall", doc_with_icon(&tall))
        .with_document("none", json!({}));
    let service = IconService::new(store, MockFetcher::new());

    for size in IconSize::ALL {
        for id in ["wide", "tall", "none"] {
            let icon = render(&service, id, size).await;
            let img = decode_png(&icon.data);
            assert_eq!(
                img.dimensions(),
                (size.pixels(), size.pixels()),
                "{id} @ {size}"
            );
        }
    }
}

#[tokio::test]
async fn test_inline_aspect_ratio_and_centering() {
    // 120x50 at 512: scale 4.2667 -> 512 x 213, y = (512 - 213) / 2 = 149
    let color = [250, 20, 20, 255];
    let icon = data_url("image/png", &solid_png(120, 50, color));
    let store = MemoryApplicationStore::new().with_document("app", doc_with_icon(&icon));
    let service = IconService::new(store, MockFetcher::new());

    let icon = render(&service, "app", IconSize::Px512).await;
    assert_eq!(icon.origin, IconOrigin::Inline);
    let img = decode_png(&icon.data);

    let placement = contain_fit(120, 50, 512);
    assert_eq!((placement.width, placement.height), (512, 213));
    assert_eq!((placement.x, placement.y), (0, 149));

    // Aspect ratio preserved within one pixel
    let expected_height = 50.0 * 512.0 / 120.0;
    assert!((placement.height as f64 - expected_height).abs() <= 1.0);

    // Transparent above and below, opaque inside
    assert_eq!(img.get_pixel(256, placement.y - 1)[3], 0);
    assert_eq!(img.get_pixel(256, placement.y + placement.height)[3], 0);
    assert_eq!(*img.get_pixel(256, placement.y), Rgba(color));
    assert_eq!(*img.get_pixel(0, 256), Rgba(color));
    assert_eq!(
        *img.get_pixel(511, placement.y + placement.height - 1),
        Rgba(color)
    );
}

#[tokio::test]
async fn test_single_red_pixel_fills_canvas() {
    let red = data_url("image/png", &solid_png(1, 1, [255, 0, 0, 255]));
    let store = MemoryApplicationStore::new().with_document("red", doc_with_icon(&red));
    let service = IconService::new(store, MockFetcher::new());

    let img = decode_png(&render(&service, "red", IconSize::Px192).await.data);
    assert_eq!(img.dimensions(), (192, 192));
    assert!(img.pixels().all(|p| *p == Rgba([255, 0, 0, 255])));
}

#[tokio::test]
async fn test_unpadded_base64_icon_is_rendered() {
    use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};

    let png = solid_png(1, 1, [255, 0, 0, 255]);
    let icon = format!("data:image/png;base64,{}", STANDARD_NO_PAD.encode(&png));
    let store = MemoryApplicationStore::new().with_document("unpadded", doc_with_icon(&icon));
    let service = IconService::new(store, MockFetcher::new());

    let icon = render(&service, "unpadded", IconSize::Px192).await;
    assert_eq!(icon.origin, IconOrigin::Inline);
    assert_eq!(*decode_png(&icon.data).get_pixel(96, 96), Rgba([255, 0, 0, 255]));
}

#[tokio::test]
async fn test_large_source_is_downscaled() {
    let img = image::RgbaImage::from_fn(1024, 1024, |x, y| {
        Rgba([(x / 4) as u8, (y / 4) as u8, 128, 255])
    });
    let store = MemoryApplicationStore::new()
        .with_document("big", doc_with_icon(&data_url("image/png", &png_of(&img))));
    let service = IconService::new(store, MockFetcher::new());

    let icon = render(&service, "big", IconSize::Px192).await;
    assert_eq!(icon.origin, IconOrigin::Inline);
    let out = decode_png(&icon.data);
    assert!(out.pixels().all(|p| p[3] == 255));
}

// =============================================================================
// Placeholder Fallback
// =============================================================================

#[tokio::test]
async fn test_failures_yield_identical_placeholder() {
    let store = MemoryApplicationStore::new()
        .with_document("missing-field", json!({ "settings": { "title": "x" } }))
        .with_document("no-settings", json!({ "ui": {} }))
        .with_document("non-string", json!({ "settings": { "icon": 42 } }))
        .with_document("unparseable", doc_with_icon("::definitely not a url::"))
        .with_document("wrong-scheme", doc_with_icon("ftp://example.com/icon.png"))
        .with_document("unreachable", doc_with_icon("https://unreachable.invalid/icon.png"))
        .with_document("bad-base64", doc_with_icon("data:image/png;base64,%%%not-base64%%%"))
        .with_document("no-comma", doc_with_icon("data:image/png;base64"))
        .with_document("svg", doc_with_icon("data:image/svg+xml,<svg></svg>"))
        .with_application("never-published", ApplicationRecord::default());
    let service = IconService::new(store, MockFetcher::new());

    for size in IconSize::ALL {
        let expected = PlaceholderGenerator::new().generate(size.pixels());
        assert!(!expected.is_empty());

        for id in [
            "missing-field",
            "no-settings",
            "non-string",
            "unparseable",
            "wrong-scheme",
            "unreachable",
            "bad-base64",
            "no-comma",
            "svg",
            "never-published",
            "unknown",
        ] {
            let icon = render(&service, id, size).await;
            assert_eq!(icon.origin, IconOrigin::Placeholder, "{id}");
            assert_eq!(icon.data, expected, "{id} @ {size}");
        }
    }
}

#[tokio::test]
async fn test_store_outage_yields_placeholder() {
    let service = IconService::new(FailingStore, MockFetcher::new());
    let icon = service
        .render_icon(&IconRequest::new("app", IconSize::Px192))
        .await;

    assert_eq!(icon.origin, IconOrigin::Placeholder);
    let img = decode_png(&icon.data);
    assert_eq!(*img.get_pixel(0, 0), PLACEHOLDER_BACKGROUND);
    assert_eq!(*img.get_pixel(96, 96), Rgba([255, 255, 255, 255]));
}

#[tokio::test]
async fn test_editing_document_used_when_unpublished() {
    let draft = doc_with_icon(&data_url("image/png", &solid_png(4, 4, [0, 255, 0, 255])));
    let store =
        MemoryApplicationStore::new().with_application("draft", ApplicationRecord::editing(draft));
    let service = IconService::new(store, MockFetcher::new());

    let icon = render(&service, "draft", IconSize::Px192).await;
    assert_eq!(icon.origin, IconOrigin::Inline);
}

// =============================================================================
// Determinism
// =============================================================================

#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let img = image::RgbaImage::from_fn(45, 31, |x, y| {
        Rgba([(x * 5) as u8, (y * 8) as u8, 77, 200])
    });
    let store = MemoryApplicationStore::new()
        .with_document("app", doc_with_icon(&data_url("image/png", &png_of(&img))));
    let service = IconService::new(store, MockFetcher::new());

    for size in IconSize::ALL {
        let first = render(&service, "app", size).await;
        let second = render(&service, "app", size).await;
        assert_eq!(first.data, second.data);
    }
}

#[tokio::test]
async fn test_concurrent_requests() {
    let icon = data_url("image/png", &solid_png(10, 20, [3, 4, 5, 255]));
    let store = MemoryApplicationStore::new().with_document("app", doc_with_icon(&icon));
    let service = std::sync::Arc::new(IconService::new(store, MockFetcher::new()));

    let mut handles = Vec::new();
    for i in 0..8 {
        let service = std::sync::Arc::clone(&service);
        let id = if i % 2 == 0 { "app" } else { "missing" };
        handles.push(tokio::spawn(async move {
            service
                .render_icon(&IconRequest::new(id, IconSize::Px192))
                .await
                .data
        }));
    }

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }

    assert!(results.iter().step_by(2).all(|r| *r == results[0]));
    assert!(results.iter().skip(1).step_by(2).all(|r| *r == results[1]));
    assert_ne!(results[0], results[1]);
}
