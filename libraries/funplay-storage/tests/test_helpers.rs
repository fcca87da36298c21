//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using real SQLite files (not in-memory)
//! so migrations, constraints and indexes behave as in production.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use funplay_core::VideoItem;
use funplay_storage::videos::NewVideo;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = funplay_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        funplay_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Fixed point in time; `minutes` later means newer
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes)
}

/// Test fixture: a video in `channel`/`category` with `views`
pub fn test_video(id: &str, channel: &str, category: &str, views: u64) -> VideoItem {
    VideoItem::new(id, format!("Video {}", id), format!("https://cdn/{}.mp4", id))
        .with_channel(channel, format!("Channel {}", channel))
        .with_category(category)
        .with_view_count(views)
}

/// Test fixture: insert a video created at `minutes`
pub async fn insert_video(pool: &SqlitePool, video: VideoItem, is_public: bool, minutes: i64) {
    funplay_storage::videos::upsert(
        pool,
        &NewVideo {
            video,
            is_public,
            created_at: at(minutes),
        },
    )
    .await
    .expect("Failed to insert video");
}

pub fn ids(videos: &[VideoItem]) -> Vec<String> {
    videos.iter().map(|v| v.id.clone()).collect()
}
