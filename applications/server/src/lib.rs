//! Violet Server Library
//!
//! Catalog service for Violet Player: song list, lookup and creation over
//! HTTP, plus the audio and cover files the songs point at.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

use axum::{
    http::{header, HeaderValue},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

// Re-export commonly used types for convenience
pub use self::config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::CatalogService;
pub use state::AppState;

/// Build the full application router
///
/// API routes, static `/audio` and `/images` (when enabled), CORS for the
/// configured origins, and HTTP tracing.
pub fn create_router(app_state: AppState, config: &ServerConfig) -> Result<Router> {
    let mut router = api::routes();

    if config.static_files.enabled {
        let root = &config.static_files.root;
        router = router
            .nest_service("/audio", ServeDir::new(root.join("audio")))
            .nest_service("/images", ServeDir::new(root.join("images")));
    }

    Ok(router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(cors_layer(&config.cors.allowed_origins)?)
        .with_state(app_state))
}

fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|e| {
                ServerError::Config(format!("Invalid CORS origin {:?}: {}", origin, e))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([header::LOCATION]))
}
