//! Command dispatch
//!
//! Every invocation opens the catalog, restores the persisted session, applies
//! one command and waits for the session write before returning the text to
//! print.

use crate::config::CliConfig;
use crate::error::{CliError, Result};
use clap::{Subcommand, ValueEnum};
use funplay_core::{ContentStore, ContextType, RepeatMode, VideoItem};
use funplay_playback::{FileSessionStorage, PlaybackSession, SessionStore, DEFAULT_UP_NEXT_COUNT};
use funplay_storage::{catalog, Catalog, SqliteContentStore};
use std::fmt::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Import channels, videos and playlists from a JSON catalog
    Import {
        /// Catalog file path
        path: PathBuf,
    },
    /// Start a new session at a video
    Play {
        /// Video to start with
        video_id: String,
        /// Where playback was started from
        #[arg(long, default_value = "home_feed", value_parser = parse_context)]
        context: ContextType,
        /// Playlist or channel id for scoped contexts
        #[arg(long)]
        context_id: Option<String>,
    },
    /// Advance to the next video
    Next,
    /// Go back to the previously played video
    Previous,
    /// Jump to a video already in the queue
    Skip { video_id: String },
    /// Queue a video to play next
    Enqueue { video_id: String },
    /// Remove a video from the queue
    Remove { video_id: String },
    /// Move the queue entry at one position to another
    Move { from: usize, to: usize },
    /// Turn shuffle on or off
    Shuffle { state: Toggle },
    /// Set the repeat mode (off, all, one)
    Repeat {
        #[arg(value_parser = parse_repeat)]
        mode: RepeatMode,
    },
    /// Turn autoplay on or off
    Autoplay { state: Toggle },
    /// Record the playback position of the current video
    Progress {
        /// Offset in milliseconds
        position_ms: u64,
    },
    /// Show the next videos in the queue
    UpNext {
        #[arg(short, long, default_value_t = DEFAULT_UP_NEXT_COUNT)]
        count: usize,
    },
    /// Show the live session
    Status,
    /// Discard the session
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(self) -> bool {
        self == Toggle::On
    }
}

fn parse_context(s: &str) -> std::result::Result<ContextType, String> {
    ContextType::from_str(s).ok_or_else(|| format!("unknown context type: {}", s))
}

fn parse_repeat(s: &str) -> std::result::Result<RepeatMode, String> {
    RepeatMode::from_str(s).ok_or_else(|| format!("unknown repeat mode: {}", s))
}

const NO_SESSION: &str = "No active session";

/// Catalog plus the restored session store
pub struct Player {
    catalog: SqliteContentStore,
    sessions: SessionStore,
}

impl Player {
    /// Open the catalog database and restore the persisted session
    pub async fn open(config: &CliConfig) -> Result<Self> {
        let pool = funplay_storage::create_pool(&config.storage.database_url).await?;
        funplay_storage::run_migrations(&pool).await?;
        let catalog = SqliteContentStore::new(pool);

        let sessions = SessionStore::new(
            Arc::new(catalog.clone()),
            Arc::new(FileSessionStorage::new(&config.storage.session_dir)),
            config.playback.clone(),
        )?;
        sessions.set_user(config.user_id.clone());

        Ok(Self { catalog, sessions })
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Run one command and return what to print
    pub async fn execute(&self, command: Command) -> Result<String> {
        let output = self.dispatch(command).await?;
        self.sessions.flush().await;
        Ok(output)
    }

    async fn dispatch(&self, command: Command) -> Result<String> {
        let sessions = &self.sessions;

        let output = match command {
            Command::Import { path } => {
                let json = tokio::fs::read_to_string(&path).await?;
                let parsed = Catalog::from_json(&json)?;
                let summary = catalog::import(self.catalog.pool(), &parsed).await?;
                format!(
                    "Imported {} channels, {} videos, {} playlists",
                    summary.channels, summary.videos, summary.playlists
                )
            }
            Command::Play {
                video_id,
                context,
                context_id,
            } => {
                let start = sessions
                    .create_session(&video_id, context, context_id.as_deref(), None)
                    .await
                    .ok_or_else(|| CliError::StartFailed(video_id.clone()))?;
                let queue_len = sessions.session().map_or(0, |s| s.queue.len());
                info!(video_id = %start.id, queue_len, "Playback started");
                format!("Now playing: {} ({} in queue)", describe(&start), queue_len)
            }
            Command::Next => match sessions.next_video() {
                Some(video) => format!("Now playing: {}", describe(&video)),
                None if sessions.session().is_some() => "End of queue".to_string(),
                None => NO_SESSION.to_string(),
            },
            Command::Previous => match sessions.previous_video() {
                Some(video) => format!("Now playing: {}", describe(&video)),
                None if sessions.session().is_some() => "Nothing to go back to".to_string(),
                None => NO_SESSION.to_string(),
            },
            Command::Skip { video_id } => {
                if sessions.skip_to_video(&video_id) {
                    let current = sessions.current_video();
                    format!("Now playing: {}", current.as_ref().map_or(video_id, describe))
                } else {
                    format!("{} is not in the queue", video_id)
                }
            }
            Command::Enqueue { video_id } => {
                let video = self
                    .catalog
                    .get_video(&video_id)
                    .await?
                    .ok_or_else(|| CliError::UnknownVideo(video_id.clone()))?;
                let label = describe(&video);
                confirm(sessions.add_to_queue(video), format!("Queued next: {}", label))
            }
            Command::Remove { video_id } => {
                if sessions.session().is_none() {
                    NO_SESSION.to_string()
                } else if sessions.remove_from_queue(&video_id) {
                    format!("Removed {}", video_id)
                } else {
                    format!("{} is not in the queue", video_id)
                }
            }
            Command::Move { from, to } => {
                if sessions.session().is_none() {
                    NO_SESSION.to_string()
                } else if sessions.reorder_queue(from, to) {
                    format!("Moved {} -> {}", from, to)
                } else {
                    "Queue unchanged".to_string()
                }
            }
            Command::Shuffle { state } => confirm(
                sessions.set_shuffle(state.enabled()),
                format!("Shuffle {}", on_off(state.enabled())),
            ),
            Command::Repeat { mode } => {
                confirm(sessions.set_repeat(mode), format!("Repeat {}", mode))
            }
            Command::Autoplay { state } => confirm(
                sessions.set_autoplay(state.enabled()),
                format!("Autoplay {}", on_off(state.enabled())),
            ),
            Command::Progress { position_ms } => confirm(
                sessions.update_progress(position_ms),
                format!("Position {} ms", position_ms),
            ),
            Command::UpNext { count } => {
                let up_next = sessions.get_up_next(count);
                if up_next.is_empty() {
                    "Nothing up next".to_string()
                } else {
                    let mut out = String::new();
                    for (n, video) in up_next.iter().enumerate() {
                        let _ = writeln!(out, "{:>3}. {}", n + 1, describe(video));
                    }
                    out.trim_end().to_string()
                }
            }
            Command::Status => match sessions.session() {
                Some(session) => status(&session, sessions.is_autoplay_enabled()),
                None => NO_SESSION.to_string(),
            },
            Command::Clear => {
                sessions.clear_session();
                "Session cleared".to_string()
            }
        };

        Ok(output)
    }
}

fn confirm(changed: bool, message: String) -> String {
    if changed {
        message
    } else {
        NO_SESSION.to_string()
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

fn describe(video: &VideoItem) -> String {
    match &video.channel_name {
        Some(channel) => format!("{} - {} [{}]", video.title, channel, video.id),
        None => format!("{} [{}]", video.title, video.id),
    }
}

fn status(session: &PlaybackSession, autoplay: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Session:  {}", session.session_id);
    let _ = match &session.context_id {
        Some(id) => writeln!(out, "Context:  {} ({})", session.context_type, id),
        None => writeln!(out, "Context:  {}", session.context_type),
    };
    if let Some(video) = session.current() {
        let _ = writeln!(out, "Playing:  {}", describe(video));
    }
    let _ = writeln!(
        out,
        "Position: {}/{} at {} ms",
        session.current_index + 1,
        session.queue.len(),
        session.position_ms
    );
    let _ = writeln!(
        out,
        "Shuffle:  {}  Repeat: {}  Autoplay: {}",
        on_off(session.shuffle),
        session.repeat,
        on_off(autoplay)
    );
    let _ = write!(out, "History:  {} played", session.history.len());
    out
}
