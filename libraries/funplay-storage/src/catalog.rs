//! Bulk catalog import
//!
//! A catalog document is plain JSON:
//!
//! ```json
//! {
//!   "channels": [{ "id": "c1", "name": "Morning Light" }],
//!   "videos": [{
//!     "id": "v1", "title": "Sunrise", "video_url": "https://cdn/v1.mp4",
//!     "channel_id": "c1", "category": "meditation", "view_count": 120,
//!     "created_at": "2026-01-01T06:00:00Z"
//!   }],
//!   "playlists": [{ "id": "p1", "title": "Mornings", "videos": ["v1"] }]
//! }
//! ```
//!
//! Videos default to public and to "created now". Playlist positions are
//! assigned from list order, starting at 1.

use crate::error::Result;
use crate::videos::NewVideo;
use crate::{channels, playlists, videos};
use chrono::{DateTime, Utc};
use funplay_core::VideoItem;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Catalog document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub channels: Vec<CatalogChannel>,
    #[serde(default)]
    pub videos: Vec<CatalogVideo>,
    #[serde(default)]
    pub playlists: Vec<CatalogPlaylist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogChannel {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogVideo {
    #[serde(flatten)]
    pub video: VideoItem,
    #[serde(default = "default_public")]
    pub is_public: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPlaylist {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub channel_id: Option<String>,
    /// Video ids in play order
    #[serde(default)]
    pub videos: Vec<String>,
}

fn default_public() -> bool {
    true
}

/// Row counts written by [`import`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub channels: usize,
    pub videos: usize,
    pub playlists: usize,
}

impl Catalog {
    /// Parse a catalog document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Write every channel, video and playlist in `catalog`
///
/// Existing rows with the same ids are updated; imported playlists replace
/// their previous entries.
pub async fn import(pool: &SqlitePool, catalog: &Catalog) -> Result<ImportSummary> {
    for channel in &catalog.channels {
        channels::upsert(pool, &channel.id, &channel.name).await?;
    }

    for entry in &catalog.videos {
        let new = NewVideo {
            video: entry.video.clone(),
            is_public: entry.is_public,
            created_at: entry.created_at.unwrap_or_else(Utc::now),
        };
        videos::upsert(pool, &new).await?;
    }

    for playlist in &catalog.playlists {
        playlists::upsert(pool, &playlist.id, &playlist.title, playlist.channel_id.as_deref())
            .await?;
        playlists::clear_entries(pool, &playlist.id).await?;
        for (position, video_id) in (1_i64..).zip(&playlist.videos) {
            playlists::set_entry(pool, &playlist.id, position, video_id).await?;
        }
        debug!(playlist_id = %playlist.id, entries = playlist.videos.len(), "Imported playlist");
    }

    let summary = ImportSummary {
        channels: catalog.channels.len(),
        videos: catalog.videos.len(),
        playlists: catalog.playlists.len(),
    };
    info!(
        channels = summary.channels,
        videos = summary.videos,
        playlists = summary.playlists,
        "Catalog imported"
    );
    Ok(summary)
}
