//! Startup flow: the built-in queue is live until the remote catalog lands.

use serde_json::json;
use std::time::Duration;
use violet_catalog_client::{CatalogClient, CatalogClientConfig, DEFAULT_API_BASE};
use violet_core::{built_in_catalog, SongId};
use violet_playback::{
    MediaEvent, NullMedia, PlaybackConfig, PlaybackController, PreferenceStore, Queue,
    TransportState,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn startup_controller(api_base: &str) -> PlaybackController<NullMedia> {
    PlaybackController::new(
        NullMedia::new(),
        Queue::new(built_in_catalog(api_base)).unwrap(),
        PreferenceStore::in_memory(),
        PlaybackConfig {
            stream_base: api_base.to_string(),
            ..PlaybackConfig::default()
        },
    )
}

#[tokio::test]
async fn remote_catalog_replaces_default_queue() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/songs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 7, "title": "Violet Hour", "artist": "Dusk", "duration": 240, "albumArt": "/images/v.jpg" },
            { "id": 8, "title": "Amber", "artist": "Dusk", "duration": 180, "albumArt": "/images/a.jpg" }
        ])))
        .mount(&server)
        .await;

    let mut controller = startup_controller(&server.uri());
    let pending = CatalogClient::new(
        CatalogClientConfig::new(server.uri()).with_timeout(Duration::from_secs(2)),
    )
    .unwrap()
    .spawn_load();

    // Default queue is playable before the fetch resolves
    assert_eq!(controller.queue().len(), 4);
    controller.toggle_play_pause();
    let ticket = controller.media().last_ticket().unwrap();
    controller.handle_media_event(MediaEvent::PlaySettled {
        ticket,
        outcome: Ok(()),
    });
    assert_eq!(controller.transport_state(), TransportState::Playing);

    if let Some(songs) = pending.wait().await.into_replacement() {
        controller.load_queue(Queue::new(songs).unwrap());
    }

    assert_eq!(controller.queue().len(), 2);
    assert_eq!(controller.snapshot().current_song_id, Some(SongId::new(7)));
    assert_eq!(
        controller.media().source(),
        Some(format!("{}/audio/track7.mp3", server.uri()).as_str())
    );
    // Playback intent carried into the new queue
    assert!(controller.has_pending_play());
}

#[tokio::test]
async fn built_in_fallback_leaves_live_queue_alone() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut controller = startup_controller(DEFAULT_API_BASE);
    controller.select_track(2);

    let catalog = CatalogClient::new(CatalogClientConfig::new(server.uri()))
        .unwrap()
        .spawn_load()
        .wait()
        .await;

    if let Some(songs) = catalog.into_replacement() {
        controller.load_queue(Queue::new(songs).unwrap());
    }

    assert_eq!(controller.current_index(), 2);
    assert_eq!(controller.current_song().map(|s| s.title.as_str()), Some("Purple Haze"));
}
