//! Content-store contract consumed by the playback core

use crate::error::Result;
use crate::types::{PlaylistEntry, VideoItem};
use async_trait::async_trait;

/// Read-only access to the video catalog
///
/// This trait abstracts the hosted catalog so the playback core can run
/// against a local `SQLite` database, a remote API, or an in-memory fixture.
///
/// "Public" listings only ever return videos flagged as publicly visible.
/// A reference that no longer resolves is not an error: implementations
/// return `None` or an empty list. `Err` is reserved for the store itself
/// failing (connection, query, decoding).
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Resolve one video by id
    async fn get_video(&self, id: &str) -> Result<Option<VideoItem>>;

    /// List the entries of a playlist ordered by stored position, ascending
    async fn list_playlist_entries(&self, playlist_id: &str) -> Result<Vec<PlaylistEntry>>;

    /// List public videos of a channel, newest first, at most `limit`
    async fn list_channel_videos(&self, channel_id: &str, limit: usize) -> Result<Vec<VideoItem>>;

    /// List public videos in `category` not in `exclude`, by view count descending
    async fn list_category_videos(
        &self,
        category: &str,
        exclude: &[String],
        limit: usize,
    ) -> Result<Vec<VideoItem>>;

    /// List public videos not in `exclude`, by view count descending
    async fn list_popular_videos(&self, exclude: &[String], limit: usize)
        -> Result<Vec<VideoItem>>;
}
