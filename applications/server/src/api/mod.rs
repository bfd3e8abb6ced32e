//! API route modules
pub mod health;
pub mod songs;

use crate::state::AppState;
use axum::{routing::get, Router};

/// Prefix the catalog was originally served under
pub const LEGACY_PREFIX: &str = "/SongApi";

/// Song routes, mounted at the root and under [`LEGACY_PREFIX`]
fn song_routes() -> Router<AppState> {
    Router::new()
        .route("/songs", get(songs::list_songs).post(songs::create_song))
        .route("/songs/:id", get(songs::get_song))
}

/// All API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .merge(song_routes())
        .nest(LEGACY_PREFIX, song_routes())
}
