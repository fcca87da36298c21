/// Video catalog projections
use serde::{Deserialize, Serialize};

/// Read-only projection of a catalog video
///
/// Fetched from a [`ContentStore`](crate::ContentStore) and never mutated by
/// the playback core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoItem {
    /// Unique video identifier
    pub id: String,

    /// Display title
    pub title: String,

    /// Thumbnail reference
    #[serde(default)]
    pub thumbnail_url: Option<String>,

    /// Playable media locator
    pub video_url: String,

    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<u32>,

    /// Lifetime view count
    #[serde(default)]
    pub view_count: Option<u64>,

    /// Owning channel identifier
    #[serde(default)]
    pub channel_id: Option<String>,

    /// Owning channel display name
    #[serde(default)]
    pub channel_name: Option<String>,

    /// Category tag
    #[serde(default)]
    pub category: Option<String>,
}

impl VideoItem {
    /// Create a video with only the required fields set
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        video_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            thumbnail_url: None,
            video_url: video_url.into(),
            duration: None,
            view_count: None,
            channel_id: None,
            channel_name: None,
            category: None,
        }
    }

    /// Set the owning channel
    #[must_use]
    pub fn with_channel(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.channel_id = Some(id.into());
        self.channel_name = Some(name.into());
        self
    }

    /// Set the category tag
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the view count
    #[must_use]
    pub fn with_view_count(mut self, views: u64) -> Self {
        self.view_count = Some(views);
        self
    }

    /// Set the duration in seconds
    #[must_use]
    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration = Some(seconds);
        self
    }
}

/// One row of a playlist listing
///
/// `video` is `None` when the referenced video no longer resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    /// Stored position within the playlist (ascending = playback order)
    pub position: i64,

    /// Referenced video, if it still exists
    pub video: Option<VideoItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_optional_fields() {
        let video = VideoItem::new("v1", "Sunrise", "https://cdn/v1.mp4")
            .with_channel("c1", "Calm Channel")
            .with_category("meditation")
            .with_view_count(42)
            .with_duration(600);

        assert_eq!(video.channel_id.as_deref(), Some("c1"));
        assert_eq!(video.channel_name.as_deref(), Some("Calm Channel"));
        assert_eq!(video.category.as_deref(), Some("meditation"));
        assert_eq!(video.view_count, Some(42));
        assert_eq!(video.duration, Some(600));
        assert_eq!(video.thumbnail_url, None);
    }

    #[test]
    fn missing_optional_fields_deserialize_as_none() {
        let json = r#"{"id":"v1","title":"Sunrise","video_url":"https://cdn/v1.mp4"}"#;
        let video: VideoItem = serde_json::from_str(json).unwrap();

        assert_eq!(video, VideoItem::new("v1", "Sunrise", "https://cdn/v1.mp4"));
    }
}
