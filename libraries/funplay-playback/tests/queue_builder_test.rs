//! Queue construction tests
//!
//! Exercise each context type against an in-memory catalog, both through
//! `QueueBuilder` directly and through `SessionStore::create_session`.

use funplay_core::{ContextType, MemoryContentStore, VideoItem};
use funplay_playback::{MemorySessionStorage, PlaybackConfig, QueueBuilder, SessionStore};
use std::sync::Arc;

fn video(id: &str, channel: &str, category: &str, views: u64) -> VideoItem {
    VideoItem::new(id, format!("Video {}", id), format!("https://cdn/{}.mp4", id))
        .with_channel(channel, format!("Channel {}", channel))
        .with_category(category)
        .with_view_count(views)
}

fn ids(queue: &[VideoItem]) -> Vec<String> {
    queue.iter().map(|v| v.id.clone()).collect()
}

fn session_store(content: Arc<MemoryContentStore>) -> SessionStore {
    SessionStore::new(
        content,
        Arc::new(MemorySessionStorage::new()),
        PlaybackConfig::default(),
    )
    .unwrap()
}

#[tokio::test]
async fn playlist_queue_follows_positions_and_drops_dangling() {
    let content = Arc::new(MemoryContentStore::new());
    content.insert_video(video("a", "c1", "music", 1), true);
    content.insert_video(video("b", "c1", "music", 1), true);
    content.add_playlist_entry("p1", 3, "a");
    content.add_playlist_entry("p1", 1, "b");
    content.add_playlist_entry("p1", 2, "deleted");

    let store = session_store(content);
    let start = store
        .create_session("a", ContextType::Playlist, Some("p1"), None)
        .await
        .unwrap();
    assert_eq!(start.id, "a");

    let session = store.session().unwrap();
    assert_eq!(ids(&session.queue), vec!["b", "a"]);
    assert_eq!(session.current_index, 1);
    assert_eq!(session.context_id.as_deref(), Some("p1"));
}

#[tokio::test]
async fn start_video_outside_playlist_is_prepended() {
    let content = Arc::new(MemoryContentStore::new());
    content.insert_video(video("a", "c1", "music", 1), true);
    content.insert_video(video("outsider", "c2", "talk", 1), true);
    content.add_playlist_entry("p1", 1, "a");

    let store = session_store(content);
    store
        .create_session("outsider", ContextType::Playlist, Some("p1"), None)
        .await
        .unwrap();

    let session = store.session().unwrap();
    assert_eq!(ids(&session.queue), vec!["outsider", "a"]);
    assert_eq!(session.current_index, 0);
}

#[tokio::test]
async fn channel_queue_is_newest_first_and_bounded() {
    let content = Arc::new(MemoryContentStore::new());
    for i in 0..60 {
        content.insert_video(video(&format!("v{:02}", i), "c1", "music", 1), true);
    }

    let store = session_store(content);
    store
        .create_session("v59", ContextType::Channel, Some("c1"), None)
        .await
        .unwrap();
    let session = store.session().unwrap();
    assert_eq!(session.queue.len(), 50);
    assert_eq!(session.queue[0].id, "v59");
    assert_eq!(session.queue[49].id, "v10");
    assert_eq!(session.current_index, 0);

    // Too old to make the cut: prepended
    store
        .create_session("v00", ContextType::Channel, Some("c1"), None)
        .await
        .unwrap();
    let session = store.session().unwrap();
    assert_eq!(session.queue.len(), 51);
    assert_eq!(session.queue[0].id, "v00");
    assert_eq!(session.queue[1].id, "v59");
}

#[tokio::test]
async fn related_expansion_runs_category_channel_then_popular() {
    let content = Arc::new(MemoryContentStore::new());
    content.insert_video(video("start", "c1", "music", 5), true);
    content.insert_video(video("m3", "c2", "music", 10), true);
    content.insert_video(video("m1", "c2", "music", 30), true);
    content.insert_video(video("m2", "c3", "music", 20), true);
    content.insert_video(video("own-old", "c1", "talk", 1), true);
    content.insert_video(video("own-new", "c1", "talk", 2), true);
    content.insert_video(video("hidden", "c1", "music", 999), false);
    content.insert_video(video("pop-high", "c4", "news", 100), true);
    content.insert_video(video("pop-low", "c4", "news", 3), true);

    let store = session_store(content);
    store
        .create_session("start", ContextType::HomeFeed, None, None)
        .await
        .unwrap();

    let session = store.session().unwrap();
    assert_eq!(
        ids(&session.queue),
        vec!["start", "m1", "m2", "m3", "own-new", "own-old", "pop-high", "pop-low"]
    );
    assert_eq!(session.current_index, 0);
}

#[tokio::test]
async fn related_expansion_is_capped() {
    let content = Arc::new(MemoryContentStore::new());
    content.insert_video(video("start", "c1", "music", 5), true);
    for i in 0..40 {
        content.insert_video(video(&format!("p{:02}", i), "c9", "news", i), true);
    }

    let config = PlaybackConfig::default();
    let start = video("start", "c1", "music", 5);
    let related = QueueBuilder::new(content.as_ref(), &config)
        .related_videos(&start, &[])
        .await
        .unwrap();

    assert_eq!(related.len(), config.related.total_limit);
    assert_eq!(related[0].id, "p39");
    assert!(related.iter().all(|v| v.id != "start"));
}

#[tokio::test]
async fn category_results_above_threshold_skip_channel_step() {
    let content = Arc::new(MemoryContentStore::new());
    for i in 0..12 {
        content.insert_video(video(&format!("m{:02}", i), "c2", "music", 100 + i), true);
    }
    content.insert_video(video("own", "c1", "talk", 1), true);

    let config = PlaybackConfig {
        related: funplay_playback::RelatedConfig {
            category_limit: 12,
            channel_threshold: 10,
            channel_limit: 10,
            total_limit: 12,
        },
        ..PlaybackConfig::default()
    };
    let start = video("start", "c1", "music", 5);
    let related = QueueBuilder::new(content.as_ref(), &config)
        .related_videos(&start, &[])
        .await
        .unwrap();

    assert_eq!(related.len(), 12);
    assert!(related.iter().all(|v| v.id != "own"));
}

#[tokio::test]
async fn meditation_uses_recommendations() {
    let content = Arc::new(MemoryContentStore::new());
    content.insert_video(video("calm", "c1", "meditation", 5), true);
    content.insert_video(video("breathe", "c2", "meditation", 8), true);

    let store = session_store(content);
    store
        .create_session("calm", ContextType::Meditation, None, None)
        .await
        .unwrap();
    assert_eq!(ids(&store.session().unwrap().queue), vec!["calm", "breathe"]);
}

#[tokio::test]
async fn initial_queue_is_used_for_playlists_only() {
    let content = Arc::new(MemoryContentStore::new());
    content.insert_video(video("a", "c1", "music", 1), true);
    content.insert_video(video("b", "c2", "music", 2), true);

    let supplied = vec![
        video("x", "c9", "talk", 1),
        video("a", "c1", "music", 1),
        video("y", "c9", "talk", 1),
    ];

    let store = session_store(content);
    store
        .create_session("a", ContextType::Playlist, Some("p1"), Some(supplied.clone()))
        .await
        .unwrap();
    let session = store.session().unwrap();
    assert_eq!(ids(&session.queue), vec!["x", "a", "y"]);
    assert_eq!(session.current_index, 1);

    // Other contexts build their own queue
    store
        .create_session("a", ContextType::Related, None, Some(supplied))
        .await
        .unwrap();
    assert_eq!(ids(&store.session().unwrap().queue), vec!["a", "b"]);
}
