//! Domain types for Funplay

mod playback;
mod video;

pub use playback::{ContextType, RepeatMode};
pub use video::{PlaylistEntry, VideoItem};
