//! Session store - the single live playback session
//!
//! Owns the [`PlaybackSession`], applies every mutation atomically under one
//! lock, and queues a persistence write after each successful mutation.
//!
//! Failures never reach the caller: content-store errors, corrupt persisted
//! state and invalid arguments are logged and surface as "no change"
//! (`false`/`None`) or "no session".

use crate::builder::{ensure_start_video, QueueBuilder};
use crate::error::Result;
use crate::history::PlayHistory;
use crate::persistence::{PersistenceWriter, SessionStorage};
use crate::random::{RandomSource, ThreadRandom};
use crate::selector::{self, Selection};
use crate::types::{PlaybackConfig, PlaybackSession};
use chrono::Utc;
use funplay_core::{ContentStore, ContextType, RepeatMode, VideoItem};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

struct State {
    session: Option<PlaybackSession>,
    current_video: Option<VideoItem>,

    /// Ids that may not be replayed even when every candidate is recent.
    /// Cleared on create, clear, resume and the shuffle repeat-all reset.
    exhausted: HashSet<String>,

    /// Session id of the newest `create_session` still building its queue
    pending_build: Option<String>,

    user_id: Option<String>,
    random: Box<dyn RandomSource>,
}

/// Holds the live playback session
///
/// Share it behind an `Arc`; every method takes `&self`.
pub struct SessionStore {
    content: Arc<dyn ContentStore>,
    storage: Arc<dyn SessionStorage>,
    config: PlaybackConfig,
    writer: PersistenceWriter,
    state: Mutex<State>,
}

impl SessionStore {
    /// Create the store and restore the last persisted session, if any
    pub fn new(
        content: Arc<dyn ContentStore>,
        storage: Arc<dyn SessionStorage>,
        config: PlaybackConfig,
    ) -> Result<Self> {
        let writer = PersistenceWriter::spawn(storage.clone(), config.storage_key.clone())?;
        let session = read_persisted(storage.as_ref(), &config);
        let current_video = session.as_ref().and_then(|s| s.current().cloned());

        if let Some(session) = &session {
            info!(session_id = %session.session_id, "Restored playback session");
        }

        Ok(Self {
            content,
            storage,
            config,
            writer,
            state: Mutex::new(State {
                session,
                current_video,
                exhausted: HashSet::new(),
                pending_build: None,
                user_id: None,
                random: Box::new(ThreadRandom),
            }),
        })
    }

    /// Replace the random source used for shuffle picks
    #[must_use]
    pub fn with_random_source(mut self, random: Box<dyn RandomSource>) -> Self {
        self.state.get_mut().random = random;
        self
    }

    /// Set the viewer identity stamped on sessions created from now on
    pub fn set_user(&self, user_id: Option<String>) {
        self.state.lock().user_id = user_id;
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    // ===== Read state =====

    /// Snapshot of the live session
    pub fn session(&self) -> Option<PlaybackSession> {
        self.state.lock().session.clone()
    }

    /// Video currently loaded in the player
    pub fn current_video(&self) -> Option<VideoItem> {
        self.state.lock().current_video.clone()
    }

    pub fn is_autoplay_enabled(&self) -> bool {
        self.state
            .lock()
            .session
            .as_ref()
            .map_or(self.config.default_autoplay, |session| session.autoplay)
    }

    /// Anti-repeat check; `true` when no session is live
    pub fn can_play_video(&self, video_id: &str) -> bool {
        let state = self.state.lock();
        match &state.session {
            Some(session) => selector::can_play_video(
                session,
                &state.exhausted,
                video_id,
                self.config.anti_repeat_window,
            ),
            None => true,
        }
    }

    /// Up to `count` queued videos after the current one
    ///
    /// Recomputed on every call; never mutates.
    pub fn get_up_next(&self, count: usize) -> Vec<VideoItem> {
        self.state
            .lock()
            .session
            .as_ref()
            .map(|session| session.up_next(count).to_vec())
            .unwrap_or_default()
    }

    // ===== Lifecycle =====

    /// Start a new session at `video_id`, replacing the live one
    ///
    /// A non-empty `initial_queue` is used as-is for `PLAYLIST` contexts and
    /// is searched for the start video before asking the store. Returns the
    /// start video, or `None` (leaving any live session untouched) when the
    /// start video cannot be resolved, the store fails, or a newer
    /// `create_session`/`clear_session` superseded this one mid-build.
    pub async fn create_session(
        &self,
        video_id: &str,
        context_type: ContextType,
        context_id: Option<&str>,
        initial_queue: Option<Vec<VideoItem>>,
    ) -> Option<VideoItem> {
        let session_id = Uuid::new_v4().to_string();
        let user_id = {
            let mut state = self.state.lock();
            state.pending_build = Some(session_id.clone());
            state.user_id.clone()
        };

        let built = self
            .build_session(
                &session_id,
                user_id,
                video_id,
                context_type,
                context_id,
                initial_queue.unwrap_or_default(),
            )
            .await;

        let mut state = self.state.lock();
        if state.pending_build.as_deref() != Some(session_id.as_str()) {
            warn!(
                session_id = %session_id,
                video_id = %video_id,
                "Discarding superseded session build"
            );
            return None;
        }
        state.pending_build = None;

        let (session, start) = match built {
            Ok(Some(built)) => built,
            Ok(None) => {
                info!(video_id = %video_id, "Start video not found; no session created");
                return None;
            }
            Err(e) => {
                warn!(video_id = %video_id, error = %e, "Failed to build playback session");
                return None;
            }
        };

        info!(
            session_id = %session.session_id,
            context = %session.context_type,
            queue_len = session.queue.len(),
            "Created playback session"
        );

        self.persist(&session);
        state.session = Some(session);
        state.current_video = Some(start.clone());
        state.exhausted.clear();

        Some(start)
    }

    async fn build_session(
        &self,
        session_id: &str,
        user_id: Option<String>,
        video_id: &str,
        context_type: ContextType,
        context_id: Option<&str>,
        initial_queue: Vec<VideoItem>,
    ) -> Result<Option<(PlaybackSession, VideoItem)>> {
        let start = match initial_queue.iter().find(|video| video.id == video_id) {
            Some(video) => video.clone(),
            None => match self.content.get_video(video_id).await? {
                Some(video) => video,
                None => return Ok(None),
            },
        };

        let mut queue = if context_type == ContextType::Playlist && !initial_queue.is_empty() {
            initial_queue
        } else {
            QueueBuilder::new(self.content.as_ref(), &self.config)
                .build(&start, context_type, context_id)
                .await?
        };
        let current_index = ensure_start_video(&mut queue, &start);

        let session = PlaybackSession {
            session_id: session_id.to_string(),
            user_id,
            start_video_id: video_id.to_string(),
            context_type,
            context_id: context_id.map(str::to_string),
            queue,
            history: PlayHistory::starting_with(video_id),
            current_index,
            position_ms: 0,
            autoplay: self.config.default_autoplay,
            shuffle: false,
            repeat: RepeatMode::Off,
            created_at: Utc::now(),
        };

        Ok(Some((session, start)))
    }

    /// Discard the live session and its persisted copy
    ///
    /// Also cancels any `create_session` still building.
    pub fn clear_session(&self) {
        let mut state = self.state.lock();
        if let Some(session) = state.session.take() {
            info!(session_id = %session.session_id, "Cleared playback session");
        }
        state.current_video = None;
        state.exhausted.clear();
        state.pending_build = None;
        self.writer.remove();
    }

    /// Reload the last persisted session as the live one
    ///
    /// Returns `false` (live state untouched) when nothing valid is stored.
    pub async fn resume_session(&self) -> bool {
        self.writer.flush().await;

        let Some(session) = read_persisted(self.storage.as_ref(), &self.config) else {
            return false;
        };

        info!(session_id = %session.session_id, "Resumed playback session");
        let mut state = self.state.lock();
        state.current_video = session.current().cloned();
        state.session = Some(session);
        state.exhausted.clear();
        state.pending_build = None;
        true
    }

    /// Wait for queued persistence writes to reach storage
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    // ===== Navigation =====

    /// Advance according to shuffle/repeat and the anti-repeat rules
    ///
    /// Returns the new current video, the unchanged current video for
    /// `repeat == one`, or `None` at end of queue.
    pub fn next_video(&self) -> Option<VideoItem> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let session = state.session.as_mut()?;

        let current_id = match state.current_video.as_ref() {
            Some(video) => Some(video.id.as_str()),
            None => session.current().map(|video| video.id.as_str()),
        };

        let selection = selector::select_next(
            session,
            current_id,
            &state.exhausted,
            self.config.anti_repeat_window,
            state.random.as_mut(),
        );

        match selection {
            Selection::Replay => state.current_video.clone(),
            Selection::EndOfQueue => {
                debug!(session_id = %session.session_id, "End of queue");
                None
            }
            Selection::Advance {
                index,
                reset_exhausted,
            } => {
                if reset_exhausted {
                    state.exhausted.clear();
                }
                let video = self.move_to(session, index);
                state.current_video = Some(video.clone());
                Some(video)
            }
        }
    }

    /// Step back to the previously played video
    ///
    /// Pops the last history entry instead of appending.
    pub fn previous_video(&self) -> Option<VideoItem> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let session = state.session.as_mut()?;

        let index = selector::select_previous(session)?;
        session.current_index = index;
        session.history.pop();
        session.position_ms = 0;

        let video = session.queue[index].clone();
        debug!(
            session_id = %session.session_id,
            index,
            video_id = %video.id,
            "Moved to previous video"
        );
        self.persist(session);
        state.current_video = Some(video.clone());
        Some(video)
    }

    /// Jump to the first queue entry with `video_id`
    pub fn skip_to_video(&self, video_id: &str) -> bool {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let Some(session) = state.session.as_mut() else {
            return false;
        };
        let Some(index) = session.position_of(video_id) else {
            return false;
        };

        let video = self.move_to(session, index);
        state.current_video = Some(video);
        true
    }

    /// Confirmed forward transition: record history, move the pointer, persist
    fn move_to(&self, session: &mut PlaybackSession, index: usize) -> VideoItem {
        let video = session.queue[index].clone();
        session
            .history
            .push(video.id.clone(), self.config.history_size);
        session.current_index = index;
        session.position_ms = 0;

        debug!(
            session_id = %session.session_id,
            index,
            video_id = %video.id,
            "Moved to video"
        );
        self.persist(session);
        video
    }

    // ===== Queue editing =====

    /// Insert `video` right after the current entry
    pub fn add_to_queue(&self, video: VideoItem) -> bool {
        self.mutate(|session| {
            session.insert_after_current(video);
            true
        })
    }

    /// Remove the first entry with `video_id`
    ///
    /// Removing the current entry moves the current video to the entry that
    /// takes its place (the new last entry at the tail, nothing when the queue
    /// empties). History is left as played.
    pub fn remove_from_queue(&self, video_id: &str) -> bool {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let Some(session) = state.session.as_mut() else {
            return false;
        };

        let removes_current = session.position_of(video_id) == Some(session.current_index);
        if !session.remove_video(video_id) {
            return false;
        }
        if removes_current {
            state.current_video = session.current().cloned();
            session.position_ms = 0;
        }

        self.persist(session);
        true
    }

    /// Move the entry at `from_index` to `to_index`
    pub fn reorder_queue(&self, from_index: usize, to_index: usize) -> bool {
        self.mutate(|session| session.reorder(from_index, to_index))
    }

    // ===== Settings =====

    pub fn set_autoplay(&self, enabled: bool) -> bool {
        self.mutate(|session| {
            session.autoplay = enabled;
            true
        })
    }

    pub fn set_shuffle(&self, enabled: bool) -> bool {
        self.mutate(|session| {
            session.shuffle = enabled;
            true
        })
    }

    pub fn set_repeat(&self, mode: RepeatMode) -> bool {
        self.mutate(|session| {
            session.repeat = mode;
            true
        })
    }

    /// Record the playback offset of the current video
    pub fn update_progress(&self, position_ms: u64) -> bool {
        self.mutate(|session| {
            session.position_ms = position_ms;
            true
        })
    }

    /// Apply `edit` to the live session and persist if it reports a change
    fn mutate<F>(&self, edit: F) -> bool
    where
        F: FnOnce(&mut PlaybackSession) -> bool,
    {
        let mut state = self.state.lock();
        let Some(session) = state.session.as_mut() else {
            return false;
        };

        let changed = edit(session);
        if changed {
            self.persist(session);
        }
        changed
    }

    /// Queue a write of `session`; called with the state lock held so writes
    /// reach the writer in mutation order
    fn persist(&self, session: &PlaybackSession) {
        match serde_json::to_string(session) {
            Ok(payload) => self.writer.save(payload),
            Err(e) => warn!(
                session_id = %session.session_id,
                error = %e,
                "Failed to serialize playback session"
            ),
        }
    }
}

/// Load and validate the persisted session; anything unusable counts as none
fn read_persisted(
    storage: &dyn SessionStorage,
    config: &PlaybackConfig,
) -> Option<PlaybackSession> {
    let payload = match storage.load(&config.storage_key) {
        Ok(Some(payload)) => payload,
        Ok(None) => return None,
        Err(e) => {
            warn!(error = %e, "Failed to read persisted playback session");
            return None;
        }
    };

    let mut session: PlaybackSession = match serde_json::from_str(&payload) {
        Ok(session) => session,
        Err(e) => {
            warn!(error = %e, "Ignoring corrupt persisted playback session");
            return None;
        }
    };

    if let Err(e) = session.validate() {
        warn!(error = %e, "Ignoring invalid persisted playback session");
        return None;
    }

    session.history.enforce_limit(config.history_size);
    Some(session)
}
