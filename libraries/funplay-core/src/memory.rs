//! In-memory content store
//!
//! Keeps the whole catalog in process memory. Used by tests, demos and as an
//! offline fallback; insertion order doubles as creation order.

use crate::error::{ContentError, Result};
use crate::storage::ContentStore;
use crate::types::{PlaylistEntry, VideoItem};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone)]
struct StoredVideo {
    video: VideoItem,
    is_public: bool,
    created_seq: u64,
}

#[derive(Debug, Default)]
struct Catalog {
    videos: Vec<StoredVideo>,
    playlists: HashMap<String, Vec<(i64, String)>>,
    next_seq: u64,
}

/// Catalog held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    catalog: RwLock<Catalog>,
    offline: AtomicBool,
}

impl MemoryContentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a video; later inserts count as newer
    pub fn insert_video(&self, video: VideoItem, is_public: bool) {
        let mut catalog = self.catalog.write();
        let created_seq = catalog.next_seq;
        catalog.next_seq += 1;
        catalog.videos.retain(|stored| stored.video.id != video.id);
        catalog.videos.push(StoredVideo {
            video,
            is_public,
            created_seq,
        });
    }

    /// Remove a video; playlist entries pointing at it stop resolving
    pub fn remove_video(&self, id: &str) {
        self.catalog
            .write()
            .videos
            .retain(|stored| stored.video.id != id);
    }

    /// Append a video reference to a playlist at the given position
    pub fn add_playlist_entry(&self, playlist_id: &str, position: i64, video_id: &str) {
        self.catalog
            .write()
            .playlists
            .entry(playlist_id.to_string())
            .or_default()
            .push((position, video_id.to_string()));
    }

    /// Simulate the store being unreachable; every call fails while set
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ContentError::network("content store is offline"));
        }
        Ok(())
    }

    fn public_by_views<F>(&self, exclude: &[String], limit: usize, filter: F) -> Vec<VideoItem>
    where
        F: Fn(&VideoItem) -> bool,
    {
        let catalog = self.catalog.read();
        let mut matches: Vec<&StoredVideo> = catalog
            .videos
            .iter()
            .filter(|stored| stored.is_public)
            .filter(|stored| !exclude.contains(&stored.video.id))
            .filter(|stored| filter(&stored.video))
            .collect();

        // Stable sort keeps insertion order for equal view counts
        matches.sort_by_key(|stored| Reverse(stored.video.view_count));
        matches
            .into_iter()
            .take(limit)
            .map(|stored| stored.video.clone())
            .collect()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn get_video(&self, id: &str) -> Result<Option<VideoItem>> {
        self.ensure_online()?;
        Ok(self
            .catalog
            .read()
            .videos
            .iter()
            .find(|stored| stored.video.id == id)
            .map(|stored| stored.video.clone()))
    }

    async fn list_playlist_entries(&self, playlist_id: &str) -> Result<Vec<PlaylistEntry>> {
        self.ensure_online()?;
        let catalog = self.catalog.read();
        let Some(entries) = catalog.playlists.get(playlist_id) else {
            return Ok(Vec::new());
        };

        let mut entries: Vec<PlaylistEntry> = entries
            .iter()
            .map(|(position, video_id)| PlaylistEntry {
                position: *position,
                video: catalog
                    .videos
                    .iter()
                    .find(|stored| &stored.video.id == video_id)
                    .map(|stored| stored.video.clone()),
            })
            .collect();
        entries.sort_by_key(|entry| entry.position);
        Ok(entries)
    }

    async fn list_channel_videos(&self, channel_id: &str, limit: usize) -> Result<Vec<VideoItem>> {
        self.ensure_online()?;
        let catalog = self.catalog.read();
        let mut matches: Vec<&StoredVideo> = catalog
            .videos
            .iter()
            .filter(|stored| stored.is_public)
            .filter(|stored| stored.video.channel_id.as_deref() == Some(channel_id))
            .collect();
        matches.sort_by_key(|stored| Reverse(stored.created_seq));
        Ok(matches
            .into_iter()
            .take(limit)
            .map(|stored| stored.video.clone())
            .collect())
    }

    async fn list_category_videos(
        &self,
        category: &str,
        exclude: &[String],
        limit: usize,
    ) -> Result<Vec<VideoItem>> {
        self.ensure_online()?;
        Ok(self.public_by_views(exclude, limit, |video| {
            video.category.as_deref() == Some(category)
        }))
    }

    async fn list_popular_videos(
        &self,
        exclude: &[String],
        limit: usize,
    ) -> Result<Vec<VideoItem>> {
        self.ensure_online()?;
        Ok(self.public_by_views(exclude, limit, |_| true))
    }
}
