//! Per-day scheduled/completed aggregation across all habits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::calendar::{add_days, days_from, Calendar};
use crate::habit::{is_active, is_live, CompletionIndex, Habit};

/// Upper bound on trailing windows requested from the CLI.
pub const MAX_WINDOW_DAYS: usize = 3660;

/// A half-open run of days: `[start, start + days)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    pub start: NaiveDate,
    pub days: usize,
}

impl DayWindow {
    pub fn new(start: NaiveDate, days: usize) -> Self {
        Self { start, days }
    }

    /// Window of `days` ending on (and including) `last`.
    ///
    /// A span reaching past the start of the calendar leaves the start at
    /// `last` through the [`add_days`] fallback.
    pub fn ending_on(last: NaiveDate, days: usize) -> Self {
        let back = i64::try_from(days.saturating_sub(1)).unwrap_or(i64::MAX);
        Self::new(add_days(last, -back), days)
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> {
        days_from(self.start, self.days)
    }
}

/// Which habits were due and which were done on one day.
///
/// Habits are referenced by id; `completed_habits` is always a subset of
/// `scheduled_habits` and keeps its input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub day: NaiveDate,
    pub scheduled_habits: Vec<String>,
    pub completed_habits: Vec<String>,
}

impl DailySummary {
    pub fn scheduled_count(&self) -> usize {
        self.scheduled_habits.len()
    }

    pub fn completed_count(&self) -> usize {
        self.completed_habits.len()
    }

    /// Completed / scheduled, or 0.0 when nothing was due.
    pub fn completion_ratio(&self) -> f64 {
        if self.scheduled_habits.is_empty() {
            0.0
        } else {
            self.completed_count() as f64 / self.scheduled_count() as f64
        }
    }

    /// Some but not all due habits were completed.
    pub fn is_partial(&self) -> bool {
        let done = self.completed_count();
        done > 0 && done < self.scheduled_count()
    }
}

/// Summarize a single day.
pub fn summarize_day(
    habits: &[Habit],
    index: &CompletionIndex,
    day: NaiveDate,
    calendar: &Calendar,
) -> DailySummary {
    let scheduled: Vec<&Habit> = habits
        .iter()
        .filter(|h| is_live(h, day, calendar) && is_active(&h.schedule, day))
        .collect();
    let completed_habits = scheduled
        .iter()
        .filter(|h| index.is_completed(&h.id, day))
        .map(|h| h.id.clone())
        .collect();

    DailySummary {
        day,
        scheduled_habits: scheduled.iter().map(|h| h.id.clone()).collect(),
        completed_habits,
    }
}

/// Summaries for every day in `window`.
///
/// `habits` must include archived habits: the date-aware liveness check keeps
/// their history intact while excluding them from days after archival.
pub fn daily_summaries(
    habits: &[Habit],
    index: &CompletionIndex,
    window: DayWindow,
    calendar: &Calendar,
) -> BTreeMap<NaiveDate, DailySummary> {
    window
        .iter()
        .map(|day| (day, summarize_day(habits, index, day, calendar)))
        .collect()
}
