//! Boundaries around the engine: configuration and record files.

mod config;
pub mod records;

pub use config::{Config, DisplayConfig, RecordsConfig, TimelineConfig};
pub use records::{parse_timestamp, JsonRecordFile, RawRecord, RecordSource};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/changelog-console[-dev]/` based on CHANGELOG_ENV.
///
/// Set CHANGELOG_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("CHANGELOG_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("changelog-console-dev")
    } else {
        base_dir.join("changelog-console")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
