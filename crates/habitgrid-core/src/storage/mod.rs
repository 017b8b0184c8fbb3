mod config;
pub mod snapshot;

pub use config::{CalendarConfig, Config};
pub use snapshot::{JsonSnapshotFile, Snapshot, SnapshotProvider};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns `~/.config/habitgrid[-dev]/` based on HABITGRID_ENV.
///
/// Set HABITGRID_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .ok_or(ConfigError::NoConfigDir)?
        .join(".config");

    let env = std::env::var("HABITGRID_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("habitgrid-dev")
    } else {
        base_dir.join("habitgrid")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
