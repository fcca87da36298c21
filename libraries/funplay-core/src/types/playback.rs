/// Playback context and mode types
use serde::{Deserialize, Serialize};

/// Where a playback session was started from
///
/// Determines how the initial play queue is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContextType {
    Playlist,
    Channel,
    SearchResults,
    HomeFeed,
    Related,
    Meditation,
}

impl ContextType {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Playlist => "PLAYLIST",
            Self::Channel => "CHANNEL",
            Self::SearchResults => "SEARCH_RESULTS",
            Self::HomeFeed => "HOME_FEED",
            Self::Related => "RELATED",
            Self::Meditation => "MEDITATION",
        }
    }

    /// Parse from string (case-insensitive, `-` accepted for `_`)
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "PLAYLIST" => Some(Self::Playlist),
            "CHANNEL" => Some(Self::Channel),
            "SEARCH_RESULTS" => Some(Self::SearchResults),
            "HOME_FEED" => Some(Self::HomeFeed),
            "RELATED" => Some(Self::Related),
            "MEDITATION" => Some(Self::Meditation),
            _ => None,
        }
    }

    /// Whether the queue is scoped by a playlist/channel reference
    #[must_use]
    pub fn is_scoped(&self) -> bool {
        matches!(self, Self::Playlist | Self::Channel)
    }
}

impl std::fmt::Display for ContextType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Repeat mode for playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when the queue ends
    #[default]
    Off,

    /// Wrap around to the start of the queue
    All,

    /// Keep replaying the current video
    One,
}

impl RepeatMode {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::All => "all",
            Self::One => "one",
        }
    }

    /// Parse from string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "off" => Some(Self::Off),
            "all" => Some(Self::All),
            "one" => Some(Self::One),
            _ => None,
        }
    }
}

impl std::fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_type_wire_format() {
        let json = serde_json::to_string(&ContextType::SearchResults).unwrap();
        assert_eq!(json, "\"SEARCH_RESULTS\"");

        let parsed: ContextType = serde_json::from_str("\"HOME_FEED\"").unwrap();
        assert_eq!(parsed, ContextType::HomeFeed);
    }

    #[test]
    fn context_type_parses_cli_spelling() {
        assert_eq!(ContextType::from_str("home-feed"), Some(ContextType::HomeFeed));
        assert_eq!(ContextType::from_str("playlist"), Some(ContextType::Playlist));
        assert_eq!(ContextType::from_str("album"), None);
    }

    #[test]
    fn only_playlist_and_channel_are_scoped() {
        assert!(ContextType::Playlist.is_scoped());
        assert!(ContextType::Channel.is_scoped());
        assert!(!ContextType::Meditation.is_scoped());
        assert!(!ContextType::Related.is_scoped());
    }

    #[test]
    fn repeat_mode_round_trips_through_str() {
        for mode in [RepeatMode::Off, RepeatMode::All, RepeatMode::One] {
            assert_eq!(RepeatMode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(RepeatMode::default(), RepeatMode::Off);
    }
}
