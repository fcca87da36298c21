//! Next/previous selection with anti-repeat rules
//!
//! Pure decisions over a session snapshot. The caller applies the result, so
//! nothing here mutates state.
//!
//! Anti-repeat policy:
//! - the most recent history entry is never eligible (no immediate self-repeat)
//! - entries inside the recent-history window are eligible only once every
//!   queue entry falls inside that window, and only if not marked exhausted

use crate::random::RandomSource;
use crate::types::PlaybackSession;
use funplay_core::RepeatMode;
use std::collections::HashSet;

/// Outcome of a `next` request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// `repeat == one`: keep the current item, change nothing
    Replay,

    /// Move to `index`; clear the exhausted set first if `reset_exhausted`
    Advance { index: usize, reset_exhausted: bool },

    /// Nothing eligible to play
    EndOfQueue,
}

/// Whether `video_id` may be played next
pub fn can_play_video(
    session: &PlaybackSession,
    exhausted: &HashSet<String>,
    video_id: &str,
    window: usize,
) -> bool {
    let recent = session.history.recent(window);
    can_play_with(session, exhausted, video_id, &recent)
}

fn can_play_with(
    session: &PlaybackSession,
    exhausted: &HashSet<String>,
    video_id: &str,
    recent: &HashSet<&str>,
) -> bool {
    if session.history.last() == Some(video_id) {
        return false;
    }

    if recent.contains(video_id) {
        let has_unplayed = session
            .queue
            .iter()
            .any(|video| !recent.contains(video.id.as_str()));
        if has_unplayed || exhausted.contains(video_id) {
            return false;
        }
    }

    true
}

/// Decide the next queue position
///
/// `current_id` is the id of the loaded video, used to keep shuffle from
/// picking it again.
pub fn select_next(
    session: &PlaybackSession,
    current_id: Option<&str>,
    exhausted: &HashSet<String>,
    window: usize,
    random: &mut dyn RandomSource,
) -> Selection {
    if session.queue.is_empty() {
        return Selection::EndOfQueue;
    }

    if session.repeat == RepeatMode::One {
        return Selection::Replay;
    }

    if session.shuffle {
        select_shuffled(session, current_id, window, random)
    } else {
        select_sequential(session, exhausted, window)
    }
}

fn select_shuffled(
    session: &PlaybackSession,
    current_id: Option<&str>,
    window: usize,
    random: &mut dyn RandomSource,
) -> Selection {
    let recent = session.history.recent(window);
    let not_current = |id: &str| Some(id) != current_id;

    let mut candidates: Vec<&str> = session
        .queue
        .iter()
        .map(|video| video.id.as_str())
        .filter(|id| not_current(*id) && !recent.contains(*id))
        .collect();

    let mut reset_exhausted = false;
    if candidates.is_empty() {
        if session.repeat != RepeatMode::All {
            return Selection::EndOfQueue;
        }
        candidates = session
            .queue
            .iter()
            .map(|video| video.id.as_str())
            .filter(|id| not_current(*id))
            .collect();
        reset_exhausted = true;
    }

    if candidates.is_empty() {
        return Selection::EndOfQueue;
    }

    let chosen = candidates[random.pick(candidates.len())];
    match session.position_of(chosen) {
        Some(index) => Selection::Advance {
            index,
            reset_exhausted,
        },
        None => Selection::EndOfQueue,
    }
}

fn select_sequential(
    session: &PlaybackSession,
    exhausted: &HashSet<String>,
    window: usize,
) -> Selection {
    let len = session.queue.len();
    let current = session.current_index;

    let mut next = current + 1;
    if next >= len {
        if session.repeat == RepeatMode::All {
            next = 0;
        } else {
            return Selection::EndOfQueue;
        }
    }

    let recent = session.history.recent(window);
    let eligible =
        |index: usize| can_play_with(session, exhausted, &session.queue[index].id, &recent);

    if !eligible(next) {
        // Circular scan; if nothing qualifies the plain successor stands
        if let Some(found) = (1..=len)
            .map(|offset| (current + offset) % len)
            .find(|&i| eligible(i))
        {
            next = found;
        }
    }

    Selection::Advance {
        index: next,
        reset_exhausted: false,
    }
}

/// Queue position to step back to, if history allows it
pub fn select_previous(session: &PlaybackSession) -> Option<usize> {
    session
        .history
        .previous()
        .and_then(|id| session.position_of(id))
}
