//! Funplay - Video Playback Sessions
//!
//! Platform-agnostic playback session management for Funplay.
//!
//! This crate provides:
//! - Play-queue construction from playlists, channels and recommendations
//! - Shuffle and repeat modes (Off, All, One)
//! - Anti-repeat selection over a sliding history window
//! - Bounded playback history (for "previous")
//! - Queue editing (add next, remove, drag-and-drop reorder)
//! - Session persistence and resume across restarts
//!
//! # Architecture
//!
//! `funplay-playback` knows nothing about rendering or the media player:
//! - The catalog is reached only through [`funplay_core::ContentStore`]
//! - Persistence goes through the [`SessionStorage`] trait
//! - Shuffle randomness comes from an injectable [`RandomSource`]
//!
//! # Example: Basic Session
//!
//! ```rust
//! use funplay_core::{ContextType, MemoryContentStore, VideoItem};
//! use funplay_playback::{MemorySessionStorage, PlaybackConfig, SessionStore};
//! use std::sync::Arc;
//!
//! # async fn example() -> funplay_playback::Result<()> {
//! let catalog = Arc::new(MemoryContentStore::new());
//! catalog.insert_video(VideoItem::new("v1", "Intro", "https://cdn/v1.mp4"), true);
//! catalog.insert_video(VideoItem::new("v2", "Part 2", "https://cdn/v2.mp4"), true);
//!
//! let store = SessionStore::new(
//!     catalog,
//!     Arc::new(MemorySessionStorage::new()),
//!     PlaybackConfig::default(),
//! )?;
//!
//! // Start from the home feed; the queue is filled with related videos
//! let start = store.create_session("v1", ContextType::HomeFeed, None, None).await;
//! assert_eq!(start.map(|v| v.id), Some("v1".to_string()));
//!
//! // Video ended
//! let next = store.next_video();
//! assert_eq!(next.map(|v| v.id), Some("v2".to_string()));
//! # Ok(())
//! # }
//! ```
//!
//! # Example: Shuffle and Repeat
//!
//! ```rust,no_run
//! use funplay_core::RepeatMode;
//! use funplay_playback::SessionStore;
//!
//! fn configure(store: &SessionStore) {
//!     store.set_shuffle(true);
//!     store.set_repeat(RepeatMode::All);
//! }
//! ```

mod builder;
mod error;
mod history;
mod persistence;
mod queue;
mod random;
mod selector;
mod store;
pub mod types;

// Public exports
pub use builder::{ensure_start_video, QueueBuilder};
pub use error::{PlaybackError, Result};
pub use history::PlayHistory;
pub use persistence::{FileSessionStorage, MemorySessionStorage, SessionStorage};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use selector::{can_play_video, select_next, select_previous, Selection};
pub use store::SessionStore;
pub use types::{PlaybackConfig, PlaybackSession, RelatedConfig, DEFAULT_UP_NEXT_COUNT};
