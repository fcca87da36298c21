/// CLI configuration
use crate::error::{CliError, Result};
use funplay_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Viewer identity stamped on new sessions
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Directory holding the persisted playback session
    #[serde(default = "default_session_dir")]
    pub session_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            session_dir: default_session_dir(),
        }
    }
}

impl CliConfig {
    /// Load configuration from `funplay.toml` (if present) and environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("funplay.toml"))
    }

    /// Load configuration from `path` (if present) and environment
    ///
    /// Environment variables use the `FUNPLAY_` prefix and `__` between
    /// nesting levels, e.g. `FUNPLAY_STORAGE__DATABASE_URL`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut settings = config::Config::builder();

        if path.exists() {
            settings = settings.add_source(config::File::from(path.to_path_buf()));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("FUNPLAY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.database_url.is_empty() {
            return Err(CliError::Config(
                "database URL is required (set FUNPLAY_STORAGE__DATABASE_URL)".to_string(),
            ));
        }

        if self.playback.history_size == 0 {
            return Err(CliError::Config(
                "playback.history_size must be at least 1".to_string(),
            ));
        }

        if self.playback.storage_key.is_empty() {
            return Err(CliError::Config(
                "playback.storage_key must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn default_database_url() -> String {
    "sqlite://./data/funplay.db".to_string()
}

fn default_session_dir() -> PathBuf {
    PathBuf::from("./data/session")
}
