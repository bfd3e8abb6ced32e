//! URL resolution for song assets
//!
//! The catalog service stores server-relative paths (`/images/cat.jpg`,
//! `/audio/track1.mp3`). Consumers need absolute URLs, so every path is joined
//! onto a known base unless it already carries a scheme.

use crate::error::{CoreError, Result};
use crate::types::{Song, SongId};
use url::Url;

/// Server-relative path of the default stream for a song
pub fn default_stream_path(id: SongId) -> String {
    format!("/audio/track{}.mp3", id)
}

/// Check whether a URL string already carries a scheme
///
/// `host:port/path` style strings are treated as relative, since they parse
/// as an opaque URL with the host as scheme.
pub fn has_scheme(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => !url.cannot_be_a_base() || matches!(url.scheme(), "data" | "blob"),
        Err(_) => false,
    }
}

/// Make a URL absolute against `base`
///
/// - Empty input stays empty
/// - URLs with a scheme are returned unchanged
/// - Everything else is joined onto `base` with exactly one `/`
pub fn ensure_absolute(candidate: &str, base: &str) -> String {
    if candidate.is_empty() {
        return String::new();
    }
    if has_scheme(candidate) {
        return candidate.to_string();
    }

    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        candidate.trim_start_matches('/')
    )
}

/// Validate an http(s) base URL and strip trailing slashes
pub fn normalize_base(base: &str) -> Result<String> {
    if base.is_empty() {
        return Err(CoreError::InvalidBaseUrl("URL cannot be empty".into()));
    }

    let trimmed = base.trim_end_matches('/');
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(CoreError::InvalidBaseUrl(
            "URL must start with http:// or https://".into(),
        ));
    }
    Url::parse(trimmed).map_err(|e| CoreError::InvalidBaseUrl(format!("{}: {}", trimmed, e)))?;

    Ok(trimmed.to_string())
}

/// Copy of `song` with both asset URLs made absolute
///
/// A missing stream URL is replaced by the default track location.
/// The input record is left untouched.
pub fn resolve_urls(song: &Song, base: &str) -> Song {
    let stream = song
        .stream_url
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default_stream_path(song.id));

    Song {
        album_art: ensure_absolute(&song.album_art, base),
        stream_url: Some(ensure_absolute(&stream, base)),
        ..song.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:5273";

    #[test]
    fn absolute_urls_untouched() {
        assert_eq!(
            ensure_absolute("https://cdn.example.com/a.jpg", BASE),
            "https://cdn.example.com/a.jpg"
        );
        assert_eq!(
            ensure_absolute("http://other:8080/b.mp3", BASE),
            "http://other:8080/b.mp3"
        );
        assert_eq!(ensure_absolute("data:image/png;base64,AAAA", BASE), "data:image/png;base64,AAAA");
    }

    #[test]
    fn relative_urls_joined_with_single_separator() {
        assert_eq!(ensure_absolute("/images/a.jpg", BASE), "http://localhost:5273/images/a.jpg");
        assert_eq!(ensure_absolute("images/a.jpg", BASE), "http://localhost:5273/images/a.jpg");
        assert_eq!(
            ensure_absolute("/images/a.jpg", "http://localhost:5273/"),
            "http://localhost:5273/images/a.jpg"
        );
        assert_eq!(
            ensure_absolute("//images/a.jpg", "http://localhost:5273//"),
            "http://localhost:5273/images/a.jpg"
        );
    }

    #[test]
    fn host_port_is_not_a_scheme() {
        assert!(!has_scheme("localhost:5273/audio/x.mp3"));
        assert!(has_scheme("https://example.com"));
        assert!(!has_scheme("/audio/x.mp3"));
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(ensure_absolute("", BASE), "");
    }

    #[test]
    fn base_normalization() {
        assert_eq!(normalize_base("http://localhost:5273///").unwrap(), BASE);
        assert_eq!(
            normalize_base("https://music.example.com/api/").unwrap(),
            "https://music.example.com/api"
        );
        assert!(matches!(
            normalize_base(""),
            Err(CoreError::InvalidBaseUrl(msg)) if msg.contains("empty")
        ));
        assert!(normalize_base("ftp://example.com").is_err());
        assert!(normalize_base("localhost:5273").is_err());
        assert!(normalize_base("http://").is_err());
    }

    #[test]
    fn resolve_fills_default_stream() {
        let song = Song::new(SongId::new(9), "t", "a", 100, "/images/x.jpg");
        let resolved = resolve_urls(&song, BASE);

        assert_eq!(resolved.album_art, "http://localhost:5273/images/x.jpg");
        assert_eq!(
            resolved.stream_url.as_deref(),
            Some("http://localhost:5273/audio/track9.mp3")
        );
        // Original record is not modified
        assert_eq!(song.album_art, "/images/x.jpg");
        assert!(song.stream_url.is_none());
    }

    #[test]
    fn resolve_keeps_absolute_stream() {
        let song = Song::new(SongId::new(1), "t", "a", 100, "https://img/x.jpg")
            .with_stream_url("https://cdn/x.mp3");
        let resolved = resolve_urls(&song, BASE);

        assert_eq!(resolved.album_art, "https://img/x.jpg");
        assert_eq!(resolved.stream_url.as_deref(), Some("https://cdn/x.mp3"));
    }
}
