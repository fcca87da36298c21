//! Funplay CLI Library
//!
//! Drives one persisted playback session against a local SQLite catalog.
//!
//! This library exposes the command layer for testing purposes.

pub mod commands;
pub mod config;
pub mod error;

pub use commands::{Command, Player, Toggle};
pub use config::{CliConfig, StorageSettings};
pub use error::{CliError, Result};
