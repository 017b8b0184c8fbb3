//! Habit domain model.
//!
//! Habits and completion records are read from a snapshot owned by the
//! persistence layer. Everything in this module is plain data; the
//! evaluation logic lives in the submodules.

mod index;
mod lifecycle;
mod schedule;
mod streak;

pub use index::CompletionIndex;
pub use lifecycle::{active_habits, is_live};
pub use schedule::{is_active, ScheduleSpec};
pub use streak::{StreakCalculator, StreakConfig, StreakSnapshot, MAX_STREAK_DAYS};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::Calendar;

/// A tracked habit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub schedule: ScheduleSpec,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_archived: bool,
}

impl Habit {
    /// Create a new habit with a fresh id.
    pub fn new(name: impl Into<String>, schedule: ScheduleSpec, created_at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            schedule,
            created_at,
            archived_at: None,
            is_archived: false,
        }
    }

    /// Mark the habit archived as of `at`.
    pub fn archive(&mut self, at: DateTime<Utc>) {
        self.archived_at = Some(at);
        self.is_archived = true;
    }

    /// Day the habit starts counting.
    pub fn created_on(&self, calendar: &Calendar) -> NaiveDate {
        calendar.day_of(self.created_at)
    }

    /// First day the habit no longer counts, if archived.
    pub fn archived_on(&self, calendar: &Calendar) -> Option<NaiveDate> {
        self.archived_at.map(|at| calendar.day_of(at))
    }
}

/// Completion state of one habit on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub habit_id: String,
    pub day: NaiveDate,
    pub is_completed: bool,
}

impl CompletionRecord {
    pub fn new(habit_id: impl Into<String>, day: NaiveDate, is_completed: bool) -> Self {
        Self {
            habit_id: habit_id.into(),
            day,
            is_completed,
        }
    }

    /// Build a record from an instant, discarding the time of day.
    pub fn at(
        habit_id: impl Into<String>,
        instant: DateTime<Utc>,
        is_completed: bool,
        calendar: &Calendar,
    ) -> Self {
        Self::new(habit_id, calendar.day_of(instant), is_completed)
    }
}
