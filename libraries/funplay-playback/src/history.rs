//! Playback history tracking
//!
//! Maintains a bounded, oldest-first list of the video ids actually played.
//! Feeds "previous" navigation and the anti-repeat window.

use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Playback history with bounded size
///
/// Serializes as a plain JSON array of ids, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayHistory {
    /// History buffer (most recent = back)
    ids: VecDeque<String>,
}

impl PlayHistory {
    /// Create empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create history seeded with a single played id
    pub fn starting_with(id: impl Into<String>) -> Self {
        let mut history = Self::new();
        history.ids.push_back(id.into());
        history
    }

    /// Record a played id
    ///
    /// If history is full, oldest entries are discarded
    pub fn push(&mut self, id: impl Into<String>, max_size: usize) {
        self.ids.push_back(id.into());
        self.enforce_limit(max_size);
    }

    /// Pop the most recent id (backward navigation)
    pub fn pop(&mut self) -> Option<String> {
        self.ids.pop_back()
    }

    /// Most recent id
    pub fn last(&self) -> Option<&str> {
        self.ids.back().map(String::as_str)
    }

    /// Id played before the most recent one
    pub fn previous(&self) -> Option<&str> {
        let len = self.ids.len();
        if len < 2 {
            return None;
        }
        self.ids.get(len - 2).map(String::as_str)
    }

    /// The last `window` ids as a lookup set
    pub fn recent(&self, window: usize) -> HashSet<&str> {
        let skip = self.ids.len().saturating_sub(window);
        self.ids.iter().skip(skip).map(String::as_str).collect()
    }

    /// Drop oldest entries until at most `max_size` remain
    pub fn enforce_limit(&mut self, max_size: usize) {
        let max_size = max_size.max(1);
        while self.ids.len() > max_size {
            self.ids.pop_front();
        }
    }

    /// Iterate ids oldest first
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Get number of ids in history
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for PlayHistory {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
