//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;
use violet_server::{create_router, AppState, CatalogService, ServerConfig};

pub const TEST_HOST: &str = "music.test:5273";

/// Create a test app over the seeded catalog
///
/// Static files are served from a temp dir holding one audio file and one
/// image.
pub fn create_test_app() -> (Router, TempDir) {
    create_test_app_with(|_| {})
}

/// Create a test app after adjusting the default config
pub fn create_test_app_with(adjust: impl FnOnce(&mut ServerConfig)) -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    std::fs::create_dir_all(temp_dir.path().join("audio")).unwrap();
    std::fs::create_dir_all(temp_dir.path().join("images")).unwrap();
    std::fs::write(temp_dir.path().join("audio/track1.mp3"), fixtures::AUDIO_BYTES).unwrap();
    std::fs::write(temp_dir.path().join("images/catja.jpg"), fixtures::IMAGE_BYTES).unwrap();

    let mut config = ServerConfig::default();
    config.static_files.root = temp_dir.path().to_path_buf();
    adjust(&mut config);

    let state = AppState::new(
        Arc::new(CatalogService::with_seed()),
        config.public_base_url().unwrap(),
    );
    let app = create_router(state, &config).unwrap();

    (app, temp_dir)
}

/// GET `uri` with the test host
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(header::HOST, TEST_HOST)
        .body(Body::empty())
        .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

/// POST a JSON body to `uri` with the test host
pub async fn post_json(app: &Router, uri: &str, body: &serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::HOST, TEST_HOST)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

pub mod fixtures {
    pub const AUDIO_BYTES: &[u8] = b"ID3\x03\x00fake-mp3-frames";
    pub const IMAGE_BYTES: &[u8] = b"\xFF\xD8\xFFfake-jpeg";
}
