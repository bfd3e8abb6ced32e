//! Songs API routes
use crate::{
    error::{Result, ServerError},
    middleware::RequestBase,
    state::AppState,
};
use axum::{
    extract::{OriginalUri, Path, State},
    http::{header, StatusCode},
    Json,
};
use violet_core::{resolve_urls, NewSong, Song, SongId};

/// GET /songs
pub async fn list_songs(
    State(app_state): State<AppState>,
    base: RequestBase,
) -> Json<Vec<Song>> {
    let songs = app_state
        .catalog
        .list()
        .await
        .iter()
        .map(|song| resolve_urls(song, base.as_str()))
        .collect();
    Json(songs)
}

/// GET /songs/:id
pub async fn get_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    base: RequestBase,
) -> Result<Json<Song>> {
    // Non-numeric ids cannot match a route and are reported as not found
    let id = id
        .parse::<i64>()
        .map(SongId::new)
        .map_err(|_| ServerError::NotFound(format!("Song {} not found", id)))?;

    let song = app_state.catalog.get(id).await?;
    Ok(Json(resolve_urls(&song, base.as_str())))
}

/// POST /songs
///
/// Responds `201 Created` with `Location` pointing at the new song under
/// the same prefix the request used.
pub async fn create_song(
    State(app_state): State<AppState>,
    base: RequestBase,
    OriginalUri(uri): OriginalUri,
    Json(payload): Json<NewSong>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<Song>)> {
    let song = app_state.catalog.create(payload).await?;

    let location = format!(
        "{}{}/{}",
        base.as_str(),
        uri.path().trim_end_matches('/'),
        song.id
    );

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(resolve_urls(&song, base.as_str())),
    ))
}
