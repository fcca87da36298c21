//! Core types for playback session management

use crate::error::{PlaybackError, Result};
use crate::history::PlayHistory;
use chrono::{DateTime, Utc};
use funplay_core::{ContextType, RepeatMode, VideoItem};
use serde::{Deserialize, Serialize};

/// Default number of items returned by `get_up_next`
pub const DEFAULT_UP_NEXT_COUNT: usize = 10;

/// The live playback session
///
/// Aggregate root owned by [`SessionStore`](crate::SessionStore). Callers only
/// ever see snapshots; all mutation goes through the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSession {
    /// Opaque unique token, never reused
    pub session_id: String,

    /// Viewer that owns the session (`None` when anonymous)
    #[serde(default)]
    pub user_id: Option<String>,

    /// Video that initiated the session
    pub start_video_id: String,

    /// Where playback was started from
    pub context_type: ContextType,

    /// Playlist/channel reference that scoped queue construction
    pub context_id: Option<String>,

    /// Play queue; insertion order is playback order
    pub queue: Vec<VideoItem>,

    /// Ids actually played, oldest first
    pub history: PlayHistory,

    /// Position of the loaded item in `queue`
    pub current_index: usize,

    /// Last known offset into the current item
    pub position_ms: u64,

    pub autoplay: bool,
    pub shuffle: bool,
    pub repeat: RepeatMode,

    pub created_at: DateTime<Utc>,
}

impl PlaybackSession {
    /// Item at `current_index`
    pub fn current(&self) -> Option<&VideoItem> {
        self.queue.get(self.current_index)
    }

    /// First queue position holding `video_id`
    pub fn position_of(&self, video_id: &str) -> Option<usize> {
        self.queue.iter().position(|video| video.id == video_id)
    }

    /// Check the index invariant
    ///
    /// A non-empty queue needs `current_index < queue.len()`; an empty one
    /// needs `current_index == 0`.
    pub fn validate(&self) -> Result<()> {
        let in_bounds = if self.queue.is_empty() {
            self.current_index == 0
        } else {
            self.current_index < self.queue.len()
        };

        if in_bounds {
            Ok(())
        } else {
            Err(PlaybackError::InvalidSession(format!(
                "current_index {} out of bounds for queue of {}",
                self.current_index,
                self.queue.len()
            )))
        }
    }
}

/// Limits for the related-video expansion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedConfig {
    /// Max same-category videos (default: 10)
    pub category_limit: usize,

    /// Fetch same-channel videos only while fewer than this many were found (default: 15)
    pub channel_threshold: usize,

    /// Max same-channel videos (default: 10)
    pub channel_limit: usize,

    /// Combined cap filled with popular videos (default: 20)
    pub total_limit: usize,
}

impl Default for RelatedConfig {
    fn default() -> Self {
        Self {
            category_limit: 10,
            channel_threshold: 15,
            channel_limit: 10,
            total_limit: 20,
        }
    }
}

/// Configuration for the session store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Maximum history size (default: 50)
    pub history_size: usize,

    /// Recent-history window that forbids repeats (default: 20)
    pub anti_repeat_window: usize,

    /// Storage key the session is persisted under
    pub storage_key: String,

    /// Autoplay flag for new sessions, also reported when no session is live (default: true)
    pub default_autoplay: bool,

    /// Max videos in a channel queue (default: 50)
    pub channel_queue_limit: usize,

    /// Related-video expansion limits
    pub related: RelatedConfig,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            history_size: 50,
            anti_repeat_window: 20,
            storage_key: "funplay_playback_session".to_string(),
            default_autoplay: true,
            channel_queue_limit: 50,
            related: RelatedConfig::default(),
        }
    }
}
