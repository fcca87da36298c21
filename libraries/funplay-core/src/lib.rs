//! Funplay Core
//!
//! Platform-agnostic domain types, content-store contracts and error handling
//! shared by the Funplay libraries and applications.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `VideoItem`, `PlaylistEntry`, `ContextType`, `RepeatMode`
//! - **Core Traits**: `ContentStore`, the read-only view of the video catalog
//! - **Error Handling**: Unified `ContentError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use funplay_core::{ContentStore, MemoryContentStore, VideoItem};
//!
//! # async fn example() -> funplay_core::Result<()> {
//! let store = MemoryContentStore::new();
//! store.insert_video(VideoItem::new("v1", "Morning Meditation", "https://cdn/v1.mp4"), true);
//!
//! let video = store.get_video("v1").await?;
//! assert!(video.is_some());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod memory;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{ContentError, Result};
pub use memory::MemoryContentStore;
pub use storage::ContentStore;
pub use types::{ContextType, PlaylistEntry, RepeatMode, VideoItem};
