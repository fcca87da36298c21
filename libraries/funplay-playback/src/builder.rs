//! Initial play-queue construction
//!
//! Translates `(start video, context type, context id)` into an ordered list
//! of videos by querying the [`ContentStore`]. Builds are read-only: nothing
//! here touches session state.
//!
//! | Context                                    | Queue                                     |
//! |--------------------------------------------|-------------------------------------------|
//! | `PLAYLIST`                                 | playlist entries by position, dangling dropped |
//! | `CHANNEL`                                  | newest public channel videos (bounded)    |
//! | `HOME_FEED`, `RELATED`, `SEARCH_RESULTS`, `MEDITATION` | start video + related expansion |
//!
//! Whatever the context, the start video ends up in the queue.

use crate::error::Result;
use crate::types::{PlaybackConfig, RelatedConfig};
use funplay_core::{ContentStore, ContextType, VideoItem};
use tracing::debug;

/// Builds play queues from the content store
pub struct QueueBuilder<'a> {
    store: &'a dyn ContentStore,
    config: &'a PlaybackConfig,
}

impl<'a> QueueBuilder<'a> {
    pub fn new(store: &'a dyn ContentStore, config: &'a PlaybackConfig) -> Self {
        Self { store, config }
    }

    /// Build the queue for a session starting at `start`
    ///
    /// `PLAYLIST`/`CHANNEL` without a `context_id` build an empty list, which
    /// the start-video fallback then fills. Store failures propagate.
    pub async fn build(
        &self,
        start: &VideoItem,
        context_type: ContextType,
        context_id: Option<&str>,
    ) -> Result<Vec<VideoItem>> {
        let mut queue = match (context_type, context_id) {
            (ContextType::Playlist, Some(playlist_id)) => self.playlist_queue(playlist_id).await?,
            (ContextType::Channel, Some(channel_id)) => self.channel_queue(channel_id).await?,
            (scoped, None) if scoped.is_scoped() => Vec::new(),
            _ => {
                let related = self
                    .related_videos(start, std::slice::from_ref(&start.id))
                    .await?;
                let mut queue = Vec::with_capacity(related.len() + 1);
                queue.push(start.clone());
                queue.extend(related);
                queue
            }
        };

        ensure_start_video(&mut queue, start);

        debug!(
            context = %context_type,
            context_id = ?context_id,
            len = queue.len(),
            "Built play queue"
        );
        Ok(queue)
    }

    async fn playlist_queue(&self, playlist_id: &str) -> Result<Vec<VideoItem>> {
        let mut entries = self.store.list_playlist_entries(playlist_id).await?;
        entries.sort_by_key(|entry| entry.position);

        Ok(entries.into_iter().filter_map(|entry| entry.video).collect())
    }

    async fn channel_queue(&self, channel_id: &str) -> Result<Vec<VideoItem>> {
        Ok(self
            .store
            .list_channel_videos(channel_id, self.config.channel_queue_limit)
            .await?)
    }

    /// Related-video expansion for recommendation contexts
    ///
    /// 1. same category, most viewed (if the start video has a category)
    /// 2. same channel, newest, while results are below the channel threshold
    /// 3. most viewed overall, up to the combined cap
    ///
    /// The start video and everything in `exclude` never appear, and each step
    /// skips what earlier steps collected. Results are concatenated in step
    /// order without re-sorting.
    pub async fn related_videos(
        &self,
        start: &VideoItem,
        exclude: &[String],
    ) -> Result<Vec<VideoItem>> {
        let limits: &RelatedConfig = &self.config.related;

        let mut excluded: Vec<String> = Vec::with_capacity(exclude.len() + 1);
        excluded.push(start.id.clone());
        excluded.extend(exclude.iter().filter(|id| **id != start.id).cloned());

        let mut results: Vec<VideoItem> = Vec::new();

        if let Some(category) = start.category.as_deref() {
            let found = self
                .store
                .list_category_videos(category, &excluded, limits.category_limit)
                .await?;
            debug!(category, found = found.len(), "Related: category matches");
            results.extend(found);
        }

        if results.len() < limits.channel_threshold {
            if let Some(channel_id) = start.channel_id.as_deref() {
                let skip = with_collected(&excluded, &results);
                // Channel listings have no exclusion filter; over-fetch by the
                // number of ids that may be filtered out.
                let fetched = self
                    .store
                    .list_channel_videos(channel_id, limits.channel_limit + skip.len())
                    .await?;
                let found: Vec<VideoItem> = fetched
                    .into_iter()
                    .filter(|video| !skip.contains(&video.id))
                    .take(limits.channel_limit)
                    .collect();
                debug!(channel_id, found = found.len(), "Related: channel matches");
                results.extend(found);
            }
        }

        if results.len() < limits.total_limit {
            let skip = with_collected(&excluded, &results);
            let found = self
                .store
                .list_popular_videos(&skip, limits.total_limit - results.len())
                .await?;
            debug!(found = found.len(), "Related: popular fill");
            results.extend(found);
        }

        Ok(results)
    }
}

fn with_collected(excluded: &[String], collected: &[VideoItem]) -> Vec<String> {
    excluded
        .iter()
        .cloned()
        .chain(collected.iter().map(|video| video.id.clone()))
        .collect()
}

/// Make sure `start` is in `queue`, prepending it if absent
///
/// Returns the position of the first entry with the start video's id.
pub fn ensure_start_video(queue: &mut Vec<VideoItem>, start: &VideoItem) -> usize {
    match queue.iter().position(|video| video.id == start.id) {
        Some(index) => index,
        None => {
            queue.insert(0, start.clone());
            0
        }
    }
}
