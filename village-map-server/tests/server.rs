//! Tests du routeur HTTP (sans socket)

use std::path::PathBuf;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use village_map::route::detail_href;
use village_map_server::{router, Config};

fn static_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("village-map-static-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("ntpc_villages.geojson"),
        r#"{"type":"FeatureCollection","features":[]}"#,
    )
    .unwrap();
    dir
}

fn app() -> Router {
    let mut config = Config::from_preset("ntpc").unwrap();
    config.server.static_dir = static_dir();
    router(&config).unwrap()
}

async fn get(uri: &str) -> (StatusCode, String) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_index_page() {
    let (status, body) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/pkg/village_map_web.js"));
    assert!(body.contains("\"asset_url\":\"/ntpc_villages.geojson\""));
    assert!(body.contains("\"center\":[121.48,25.02]"));
}

#[tokio::test]
async fn test_detail_page() {
    let (status, body) = get(&detail_href("A-01")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("里詳細頁"));
    assert!(body.contains("Key：A-01"));
}

#[tokio::test]
async fn test_detail_page_decodes_once() {
    let (status, body) = get(&detail_href("65000010/中正 100%")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Key：65000010/中正 100%"));

    // "%2541" encode littéralement "%41", pas "A"
    let (_, body) = get("/village/%2541").await;
    assert!(body.contains("Key：%41"));
}

#[tokio::test]
async fn test_detail_page_escapes_markup() {
    let (status, body) = get(&detail_href("<b>x</b>")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Key：&lt;b&gt;x&lt;/b&gt;"));
}

#[tokio::test]
async fn test_invalid_detail_route() {
    let (status, _) = get("/village/%FF").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get("/village/a/b").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_static_asset() {
    let (status, body) = get("/ntpc_villages.geojson").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("FeatureCollection"));

    let (status, _) = get("/missing.geojson").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
