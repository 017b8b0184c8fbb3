//! Habit and record snapshots supplied by the persistence layer.
//!
//! The engine never observes storage. A host loads a [`Snapshot`] through a
//! [`SnapshotProvider`] and hands it to the engine on every refresh.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{Result, SnapshotError};
use crate::habit::{CompletionRecord, Habit};

/// Full in-memory copy of habits and their completion records.
///
/// Record order matters: later records override earlier ones for the same
/// habit and day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub records: Vec<CompletionRecord>,
}

impl Snapshot {
    pub fn new(habits: Vec<Habit>, records: Vec<CompletionRecord>) -> Self {
        Self { habits, records }
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Check structural integrity.
    ///
    /// Duplicate habit ids are rejected. Records for unknown habits are
    /// tolerated and only logged.
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::with_capacity(self.habits.len());
        for habit in &self.habits {
            if !ids.insert(habit.id.as_str()) {
                return Err(SnapshotError::DuplicateHabit(habit.id.clone()).into());
            }
        }

        let orphans = self
            .records
            .iter()
            .filter(|r| !ids.contains(r.habit_id.as_str()))
            .count();
        if orphans > 0 {
            tracing::debug!(orphans, "records reference unknown habits");
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Source of habit snapshots.
pub trait SnapshotProvider {
    /// Load a complete, validated snapshot.
    fn load(&self) -> Result<Snapshot>;
}

impl SnapshotProvider for Snapshot {
    fn load(&self) -> Result<Snapshot> {
        self.validate()?;
        Ok(self.clone())
    }
}

/// Snapshot stored as a JSON document `{ "habits": [...], "records": [...] }`.
#[derive(Debug, Clone)]
pub struct JsonSnapshotFile {
    path: PathBuf,
}

impl JsonSnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a snapshot to this file.
    pub fn store(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, snapshot.to_json_pretty()?)?;
        Ok(())
    }
}

impl SnapshotProvider for JsonSnapshotFile {
    fn load(&self) -> Result<Snapshot> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| SnapshotError::ReadFailed {
            path: self.path.clone(),
            source,
        })?;
        let snapshot: Snapshot = serde_json::from_str(&content).map_err(|source| SnapshotError::Malformed {
            path: self.path.clone(),
            source,
        })?;
        snapshot.validate()?;
        tracing::debug!(
            path = %self.path.display(),
            habits = snapshot.habits.len(),
            records = snapshot.records.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }
}
