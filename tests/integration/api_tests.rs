//! API integration tests for the probe endpoints.
//!
//! Tests verify:
//! - Object probes return the descriptor with caching headers
//! - Repeated probes are served from the descriptor cache
//! - Uploads are probed from their first window only
//! - Error mapping (404, 413, 415, 422) and JSON error bodies

use std::sync::atomic::Ordering;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use imgprobe::{create_router, ImageFormat, ProbeService, RouterConfig};

use super::test_utils::{encode_image, MockObjectSource};

fn router_for(source: MockObjectSource) -> Router {
    create_router(ProbeService::new(source), RouterConfig::new())
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/octet-stream")
        .body(Body::from(body))
        .unwrap()
}

// =============================================================================
// Object Probes
// =============================================================================

#[tokio::test]
async fn test_probe_object_success() {
    let source = MockObjectSource::new().with_object("a.png", encode_image(ImageFormat::Png, 612, 357));
    let router = router_for(source);

    let response = router.oneshot(get("/probe/a.png")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("cache-control").unwrap(),
        "public, max-age=3600"
    );
    assert_eq!(response.headers().get("x-probe-cache-hit").unwrap(), "false");

    let json = json_body(response).await;
    assert_eq!(
        json,
        serde_json::json!({
            "format": "png",
            "media_type": "image/png",
            "width": 612,
            "height": 357,
        })
    );
}

#[tokio::test]
async fn test_probe_object_cache_hit() {
    let source =
        MockObjectSource::new().with_object("pics/b.gif", encode_image(ImageFormat::Gif, 4, 4));
    let opens = source.open_counter();
    let router = router_for(source);

    let first = router.clone().oneshot(get("/probe/pics/b.gif")).await.unwrap();
    assert_eq!(first.headers().get("x-probe-cache-hit").unwrap(), "false");

    let second = router.clone().oneshot(get("/probe/pics/b.gif")).await.unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(second.headers().get("x-probe-cache-hit").unwrap(), "true");
    assert_eq!(json_body(second).await["format"], "gif");

    assert_eq!(opens.load(Ordering::SeqCst), 1);

    let stats = json_body(router.oneshot(get("/stats")).await.unwrap()).await;
    assert_eq!(stats["hits"], 1);
    assert_eq!(stats["misses"], 1);
    assert_eq!(stats["entries"], 1);
}

#[tokio::test]
async fn test_custom_cache_max_age() {
    let source = MockObjectSource::new().with_object("a.bmp", encode_image(ImageFormat::Bmp, 2, 2));
    let router = create_router(
        ProbeService::new(source),
        RouterConfig::new().with_cache_max_age(60).with_tracing(false),
    );

    let response = router.oneshot(get("/probe/a.bmp")).await.unwrap();
    assert_eq!(
        response.headers().get("cache-control").unwrap(),
        "public, max-age=60"
    );
}

#[tokio::test]
async fn test_probe_object_not_found() {
    let router = router_for(MockObjectSource::new());

    let response = router.oneshot(get("/probe/missing.png")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = json_body(response).await;
    assert_eq!(json["error"], "not_found");
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn test_probe_object_unrecognized() {
    let source = MockObjectSource::new().with_object("notes.txt", b"just some text".to_vec());
    let router = router_for(source);

    let response = router.oneshot(get("/probe/notes.txt")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(json_body(response).await["error"], "unrecognized_format");
}

#[tokio::test]
async fn test_probe_object_too_short() {
    let source = MockObjectSource::new().with_object("stub.jpg", vec![0xFF, 0xD8]);
    let router = router_for(source);

    let response = router.oneshot(get("/probe/stub.jpg")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["error"], "insufficient_data");
}

#[tokio::test]
async fn test_probe_object_format_without_dimensions() {
    // A BMP signature with nothing after it is still a BMP
    let source = MockObjectSource::new().with_object("x.bmp", b"BM".to_vec());
    let router = router_for(source);

    let response = router.oneshot(get("/probe/x.bmp")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["format"], "bmp");
    assert_eq!(json["width"], 0);
    assert_eq!(json["height"], 0);
}

// =============================================================================
// Upload Probes
// =============================================================================

#[tokio::test]
async fn test_probe_upload() {
    let router = router_for(MockObjectSource::new());

    let response = router
        .oneshot(post("/probe", encode_image(ImageFormat::Webp, 386, 395)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("cache-control").unwrap(), "no-store");

    let json = json_body(response).await;
    assert_eq!(json["format"], "webp");
    assert_eq!(json["media_type"], "image/webp");
    assert_eq!(json["width"], 386);
    assert_eq!(json["height"], 395);
}

#[tokio::test]
async fn test_probe_upload_empty_body() {
    let router = router_for(MockObjectSource::new());

    let response = router.oneshot(post("/probe", Vec::new())).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_probe_upload_over_limit() {
    let router = create_router(
        ProbeService::new(MockObjectSource::new()),
        RouterConfig::new().with_max_upload_bytes(1024),
    );

    let mut body = encode_image(ImageFormat::Png, 1, 1);
    body.resize(4096, 0);
    let response = router.oneshot(post("/probe", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

// =============================================================================
// Health Endpoint
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let router = router_for(MockObjectSource::new());

    let response = router.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let health = json_body(response).await;
    assert_eq!(health["status"], "healthy");
    assert!(health["version"].is_string());
}
