//! Queue editing on a playback session
//!
//! Every edit keeps `current_index` pointing at the same logical entry:
//!
//! ```text
//! [v1] [v2] [v3] [v4]
//!       ^ current
//! add_to_queue(x)      -> [v1] [v2] [x] [v3] [v4]   (current stays on v2)
//! remove(v1)           -> [v2] [v3] [v4]            (current shifts to 0, still v2)
//! reorder(1 -> 3)      -> [v1] [v3] [v4] [v2]       (current follows v2 to 3)
//! ```

use crate::types::PlaybackSession;
use funplay_core::VideoItem;

/// New current index after moving the entry at `from` to `to`
pub(crate) fn reordered_index(from: usize, to: usize, current: usize) -> usize {
    if from == current {
        to
    } else if from < current && current <= to {
        current - 1
    } else if to <= current && current < from {
        current + 1
    } else {
        current
    }
}

impl PlaybackSession {
    /// Insert `video` immediately after the current entry
    pub(crate) fn insert_after_current(&mut self, video: VideoItem) {
        let at = (self.current_index + 1).min(self.queue.len());
        self.queue.insert(at, video);
    }

    /// Remove the first entry with `video_id`
    ///
    /// Returns `false` if no entry matched.
    pub(crate) fn remove_video(&mut self, video_id: &str) -> bool {
        let Some(index) = self.position_of(video_id) else {
            return false;
        };

        self.queue.remove(index);

        if index < self.current_index {
            self.current_index -= 1;
        } else if index == self.current_index {
            self.current_index = self.current_index.min(self.queue.len().saturating_sub(1));
        }

        true
    }

    /// Move the entry at `from` to `to`
    ///
    /// Returns `false` (and changes nothing) for out-of-range or identical indices.
    pub(crate) fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.queue.len();
        if from >= len || to >= len || from == to {
            return false;
        }

        let video = self.queue.remove(from);
        self.queue.insert(to, video);
        self.current_index = reordered_index(from, to, self.current_index);

        true
    }

    /// Up to `count` entries after the current one
    pub fn up_next(&self, count: usize) -> &[VideoItem] {
        let start = (self.current_index + 1).min(self.queue.len());
        let end = start.saturating_add(count).min(self.queue.len());
        &self.queue[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::PlayHistory;
    use chrono::Utc;
    use funplay_core::{ContextType, RepeatMode};

    fn create_test_video(id: &str) -> VideoItem {
        VideoItem::new(id, format!("Video {}", id), format!("https://cdn/{}.mp4", id))
    }

    fn session(ids: &[&str], current_index: usize) -> PlaybackSession {
        PlaybackSession {
            session_id: "s1".to_string(),
            user_id: None,
            start_video_id: ids.first().map(|id| (*id).to_string()).unwrap_or_default(),
            context_type: ContextType::Playlist,
            context_id: Some("p1".to_string()),
            queue: ids.iter().map(|id| create_test_video(id)).collect(),
            history: PlayHistory::new(),
            current_index,
            position_ms: 0,
            autoplay: true,
            shuffle: false,
            repeat: RepeatMode::Off,
            created_at: Utc::now(),
        }
    }

    fn queue_ids(session: &PlaybackSession) -> Vec<&str> {
        session.queue.iter().map(|v| v.id.as_str()).collect()
    }

    #[test]
    fn reordered_index_cases() {
        // Moved entry is the current one
        assert_eq!(reordered_index(1, 3, 1), 3);
        // Crosses current from below
        assert_eq!(reordered_index(0, 2, 1), 0);
        assert_eq!(reordered_index(0, 1, 1), 0);
        // Crosses current from above
        assert_eq!(reordered_index(3, 0, 1), 2);
        assert_eq!(reordered_index(3, 1, 1), 2);
        // Does not cross
        assert_eq!(reordered_index(2, 3, 1), 1);
        assert_eq!(reordered_index(0, 0, 1), 1);
    }

    #[test]
    fn insert_after_current_keeps_pointer() {
        let mut s = session(&["v1", "v2", "v3"], 1);
        s.insert_after_current(create_test_video("x"));

        assert_eq!(queue_ids(&s), vec!["v1", "v2", "x", "v3"]);
        assert_eq!(s.current_index, 1);
    }

    #[test]
    fn insert_into_empty_queue() {
        let mut s = session(&[], 0);
        s.insert_after_current(create_test_video("x"));

        assert_eq!(queue_ids(&s), vec!["x"]);
        assert_eq!(s.current_index, 0);
    }

    #[test]
    fn remove_before_current_decrements() {
        let mut s = session(&["v1", "v2", "v3"], 2);
        assert!(s.remove_video("v1"));

        assert_eq!(queue_ids(&s), vec!["v2", "v3"]);
        assert_eq!(s.current_index, 1);
        assert_eq!(s.current().unwrap().id, "v3");
    }

    #[test]
    fn remove_current_clamps() {
        let mut s = session(&["v1", "v2", "v3"], 2);
        assert!(s.remove_video("v3"));
        assert_eq!(s.current_index, 1);

        let mut s = session(&["v1"], 0);
        assert!(s.remove_video("v1"));
        assert!(s.queue.is_empty());
        assert_eq!(s.current_index, 0);
    }

    #[test]
    fn remove_only_first_duplicate() {
        let mut s = session(&["v1", "v2", "v1"], 0);
        assert!(s.remove_video("v1"));
        assert_eq!(queue_ids(&s), vec!["v2", "v1"]);
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut s = session(&["v1", "v2"], 1);
        assert!(!s.remove_video("nope"));
        assert_eq!(queue_ids(&s), vec!["v1", "v2"]);
        assert_eq!(s.current_index, 1);
    }

    #[test]
    fn reorder_rejects_out_of_range() {
        let mut s = session(&["v1", "v2"], 0);
        assert!(!s.reorder(0, 2));
        assert!(!s.reorder(5, 0));
        assert!(!s.reorder(1, 1));
        assert_eq!(queue_ids(&s), vec!["v1", "v2"]);
    }

    #[test]
    fn reorder_follows_current_entry() {
        let mut s = session(&["v1", "v2", "v3", "v4"], 3);
        assert!(s.reorder(3, 0));

        assert_eq!(queue_ids(&s), vec!["v4", "v1", "v2", "v3"]);
        assert_eq!(s.current().unwrap().id, "v4");
    }

    #[test]
    fn up_next_slices_after_current() {
        let s = session(&["v1", "v2", "v3", "v4"], 1);
        let ids: Vec<&str> = s.up_next(10).iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["v3", "v4"]);

        assert_eq!(s.up_next(1).len(), 1);
        assert!(s.up_next(0).is_empty());
    }

    #[test]
    fn up_next_at_end_is_empty() {
        let s = session(&["v1", "v2"], 1);
        assert!(s.up_next(10).is_empty());

        let s = session(&[], 0);
        assert!(s.up_next(10).is_empty());
    }
}
