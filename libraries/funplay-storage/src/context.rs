/// SQLite-backed content store
use crate::{playlists, videos};
use async_trait::async_trait;
use funplay_core::{ContentStore, PlaylistEntry, Result, VideoItem};
use sqlx::SqlitePool;

/// [`ContentStore`] over the local SQLite catalog
///
/// Each call runs one query; nothing is cached.
#[derive(Debug, Clone)]
pub struct SqliteContentStore {
    pool: SqlitePool,
}

impl SqliteContentStore {
    /// Create a store over an already migrated pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ContentStore for SqliteContentStore {
    async fn get_video(&self, id: &str) -> Result<Option<VideoItem>> {
        videos::get_by_id(&self.pool, id).await
    }

    async fn list_playlist_entries(&self, playlist_id: &str) -> Result<Vec<PlaylistEntry>> {
        playlists::list_entries(&self.pool, playlist_id).await
    }

    async fn list_channel_videos(&self, channel_id: &str, limit: usize) -> Result<Vec<VideoItem>> {
        videos::list_by_channel(&self.pool, channel_id, limit).await
    }

    async fn list_category_videos(
        &self,
        category: &str,
        exclude: &[String],
        limit: usize,
    ) -> Result<Vec<VideoItem>> {
        videos::list_by_category(&self.pool, category, exclude, limit).await
    }

    async fn list_popular_videos(
        &self,
        exclude: &[String],
        limit: usize,
    ) -> Result<Vec<VideoItem>> {
        videos::list_popular(&self.pool, exclude, limit).await
    }
}
