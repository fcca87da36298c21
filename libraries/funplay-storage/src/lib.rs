//! Funplay Storage
//!
//! `SQLite` catalog layer for Funplay.
//!
//! This crate stores channels, videos and playlists and serves them to the
//! playback core through [`SqliteContentStore`], an implementation of
//! [`funplay_core::ContentStore`].
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each table family owns its own queries
//! - **Read contracts**: Visibility, ordering and exclusion rules live in SQL
//! - **Dangling playlist entries**: kept in storage, resolved to `None` on read
//!
//! # Example
//!
//! ```rust,no_run
//! use funplay_core::ContentStore;
//! use funplay_storage::{create_pool, run_migrations, SqliteContentStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://funplay.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = SqliteContentStore::new(pool);
//! let popular = store.list_popular_videos(&[], 20).await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod catalog;
pub mod channels;
pub mod playlists;
pub mod videos;

pub use catalog::{Catalog, ImportSummary};
pub use context::SqliteContentStore;
pub use error::{Result, StorageError};

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;
use tracing::debug;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Call once at startup, before handing the pool to a store.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://funplay.db>`)
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}
