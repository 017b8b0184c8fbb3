//! Core error types for habitgrid-core.
//!
//! The schedule, streak and heatmap computations are total and never fail.
//! Errors only arise at the edges: loading configuration, reading a habit
//! snapshot, or validating user-supplied values.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for habitgrid-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Snapshot-related errors
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML decoding errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML encoding errors
    #[error("TOML encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Home directory could not be resolved
    #[error("Could not determine the configuration directory")]
    NoConfigDir,
}

/// Snapshot-specific errors.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Failed to read the snapshot file
    #[error("Failed to read snapshot at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot document is malformed
    #[error("Malformed snapshot at {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Two habits share the same id
    #[error("Duplicate habit id in snapshot: {0}")]
    DuplicateHabit(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Habit id is not present in the snapshot
    #[error("Unknown habit: {0}")]
    UnknownHabit(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
