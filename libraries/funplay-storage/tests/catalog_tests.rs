//! Integration tests for catalog import, and for running a playback session
//! against the SQLite store

mod test_helpers;

use funplay_core::{ContentStore, ContextType};
use funplay_playback::{MemorySessionStorage, PlaybackConfig, SessionStore};
use funplay_storage::{catalog, Catalog, ImportSummary, SqliteContentStore, StorageError};
use std::sync::Arc;
use test_helpers::*;

const CATALOG: &str = r#"{
  "channels": [
    { "id": "c1", "name": "Morning Light" },
    { "id": "c2", "name": "Deep Focus" }
  ],
  "videos": [
    { "id": "v1", "title": "Sunrise", "video_url": "https://cdn/v1.mp4",
      "channel_id": "c1", "category": "meditation", "view_count": 10,
      "created_at": "2026-01-01T06:00:00Z" },
    { "id": "v2", "title": "Breathe", "video_url": "https://cdn/v2.mp4",
      "channel_id": "c1", "category": "meditation", "view_count": 40,
      "created_at": "2026-01-02T06:00:00Z" },
    { "id": "v3", "title": "Drafts", "video_url": "https://cdn/v3.mp4",
      "channel_id": "c1", "is_public": false,
      "created_at": "2026-01-03T06:00:00Z" },
    { "id": "v4", "title": "Rain", "video_url": "https://cdn/v4.mp4",
      "channel_id": "c2", "category": "focus", "view_count": 90 }
  ],
  "playlists": [
    { "id": "p1", "title": "Mornings", "videos": ["v2", "v1", "v3"] }
  ]
}"#;

#[tokio::test]
async fn test_import_catalog() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let parsed = Catalog::from_json(CATALOG).unwrap();
    let summary = catalog::import(pool, &parsed).await.unwrap();
    assert_eq!(
        summary,
        ImportSummary {
            channels: 2,
            videos: 4,
            playlists: 1
        }
    );

    let store = SqliteContentStore::new(pool.clone());
    let channel = store.list_channel_videos("c1", 50).await.unwrap();
    assert_eq!(ids(&channel), vec!["v2", "v1"]);
    assert_eq!(channel[0].channel_name.as_deref(), Some("Morning Light"));

    let entries = store.list_playlist_entries("p1").await.unwrap();
    let playlist: Vec<&str> = entries
        .iter()
        .filter_map(|e| e.video.as_ref().map(|v| v.id.as_str()))
        .collect();
    assert_eq!(playlist, vec!["v2", "v1", "v3"]);
}

#[tokio::test]
async fn test_reimport_replaces_playlist_entries() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let mut parsed = Catalog::from_json(CATALOG).unwrap();
    catalog::import(pool, &parsed).await.unwrap();

    parsed.playlists[0].videos = vec!["v1".to_string()];
    catalog::import(pool, &parsed).await.unwrap();

    let store = SqliteContentStore::new(pool.clone());
    assert_eq!(store.list_playlist_entries("p1").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_catalog_is_rejected() {
    assert!(matches!(
        Catalog::from_json("{\"videos\": [{\"id\": 1}]}"),
        Err(StorageError::InvalidCatalog(_))
    ));
}

#[tokio::test]
async fn test_session_over_sqlite_catalog() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    catalog::import(pool, &Catalog::from_json(CATALOG).unwrap())
        .await
        .unwrap();

    let session_store = SessionStore::new(
        Arc::new(SqliteContentStore::new(pool.clone())),
        Arc::new(MemorySessionStorage::new()),
        PlaybackConfig::default(),
    )
    .unwrap();

    let start = session_store
        .create_session("v1", ContextType::Playlist, Some("p1"), None)
        .await
        .unwrap();
    assert_eq!(start.title, "Sunrise");

    let session = session_store.session().unwrap();
    assert_eq!(ids(&session.queue), vec!["v2", "v1", "v3"]);
    assert_eq!(session.current_index, 1);

    // Recommendation context: same category, then channel, then popular
    session_store
        .create_session("v1", ContextType::Meditation, None, None)
        .await
        .unwrap();
    let session = session_store.session().unwrap();
    assert_eq!(ids(&session.queue), vec!["v1", "v2", "v4"]);
}
