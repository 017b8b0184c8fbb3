//! Completion streaks.
//!
//! A streak is a run of consecutive *due* days on which the habit was
//! completed. Days the schedule does not cover are skipped transparently:
//! they neither extend nor break the run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{is_active, CompletionIndex, Habit};
use crate::calendar::add_days;

/// Upper bound for both streak day counts.
pub const MAX_STREAK_DAYS: u32 = 36_600;

/// Configuration for streak calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakConfig {
    /// Days before `as_of` scanned for the longest streak
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    /// Hard cap on backward traversal for the current streak
    #[serde(default = "default_max_traversal_days")]
    pub max_traversal_days: u32,
}

fn default_lookback_days() -> u32 {
    365
}

fn default_max_traversal_days() -> u32 {
    // Ten years, leap days included
    3660
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            lookback_days: default_lookback_days(),
            max_traversal_days: default_max_traversal_days(),
        }
    }
}

/// Streak values for one habit, valid only for `as_of`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSnapshot {
    pub habit_id: String,
    pub as_of: NaiveDate,
    pub current: u32,
    pub longest: u32,
}

/// Streak calculator
#[derive(Debug, Clone, Default)]
pub struct StreakCalculator {
    config: StreakConfig,
}

impl StreakCalculator {
    /// Create a new calculator with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config
    pub fn with_config(config: StreakConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StreakConfig {
        &self.config
    }

    /// Consecutive completed due days ending at `as_of`, walking backward.
    ///
    /// An incomplete due day (no record, or a record not marked completed)
    /// ends the walk. If `as_of` itself is due and not yet completed the
    /// streak is zero.
    pub fn current_streak(&self, habit: &Habit, as_of: NaiveDate, index: &CompletionIndex) -> u32 {
        let mut streak = 0u32;
        let mut cursor = as_of;

        for _ in 0..self.config.max_traversal_days {
            if is_active(&habit.schedule, cursor) {
                if !index.is_completed(&habit.id, cursor) {
                    return streak;
                }
                streak += 1;
            }

            let previous = add_days(cursor, -1);
            if previous == cursor {
                // Start of the representable calendar
                return streak;
            }
            cursor = previous;
        }

        if streak > 0 {
            tracing::warn!(
                habit = %habit.id,
                %as_of,
                cap = self.config.max_traversal_days,
                "streak traversal cap reached"
            );
        }
        streak
    }

    /// Longest run inside `[as_of - lookback_days, as_of]`, never less than
    /// the current streak.
    pub fn longest_streak(&self, habit: &Habit, as_of: NaiveDate, index: &CompletionIndex) -> u32 {
        self.longest_streak_within(habit, as_of, self.config.lookback_days, index)
    }

    /// Longest run with an explicit lookback window.
    pub fn longest_streak_within(
        &self,
        habit: &Habit,
        as_of: NaiveDate,
        lookback_days: u32,
        index: &CompletionIndex,
    ) -> u32 {
        let start = add_days(as_of, -i64::from(lookback_days));
        let mut running = 0u32;
        let mut best = 0u32;

        for day in start.iter_days().take_while(|d| *d <= as_of) {
            if !is_active(&habit.schedule, day) {
                continue;
            }
            if index.is_completed(&habit.id, day) {
                running += 1;
                best = best.max(running);
            } else {
                running = 0;
            }
        }

        best.max(self.current_streak(habit, as_of, index))
    }

    /// Both streak values for `as_of`.
    pub fn snapshot(&self, habit: &Habit, as_of: NaiveDate, index: &CompletionIndex) -> StreakSnapshot {
        StreakSnapshot {
            habit_id: habit.id.clone(),
            as_of,
            current: self.current_streak(habit, as_of, index),
            longest: self.longest_streak(habit, as_of, index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::{CompletionRecord, ScheduleSpec};
    use chrono::{TimeZone, Utc};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn habit(schedule: ScheduleSpec) -> Habit {
        let mut h = Habit::new("h", schedule, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
        h.id = "h".into();
        h
    }

    fn done(days: &[NaiveDate]) -> CompletionIndex {
        let records: Vec<_> = days
            .iter()
            .map(|d| CompletionRecord::new("h", *d, true))
            .collect();
        CompletionIndex::build(&records)
    }

    #[test]
    fn test_current_streak_daily() {
        let h = habit(ScheduleSpec::Daily);
        let index = done(&[date(3, 1), date(3, 2), date(3, 3)]);
        let calc = StreakCalculator::new();
        assert_eq!(calc.current_streak(&h, date(3, 3), &index), 3);
        assert_eq!(calc.current_streak(&h, date(3, 4), &index), 0);
        assert_eq!(calc.current_streak(&h, date(3, 2), &index), 2);
    }

    #[test]
    fn test_incomplete_record_breaks_streak() {
        let h = habit(ScheduleSpec::Daily);
        let records = vec![
            CompletionRecord::new("h", date(3, 1), true),
            CompletionRecord::new("h", date(3, 2), false),
            CompletionRecord::new("h", date(3, 3), true),
        ];
        let index = CompletionIndex::build(&records);
        let calc = StreakCalculator::new();
        assert_eq!(calc.current_streak(&h, date(3, 3), &index), 1);
    }

    #[test]
    fn test_inactive_days_are_skipped() {
        // Mon/Wed/Fri over two weeks starting Monday 2026-02-16
        let h = habit(ScheduleSpec::custom([2, 4, 6]));
        let index = done(&[
            date(2, 16),
            date(2, 18),
            date(2, 20),
            date(2, 23),
            date(2, 25),
            date(2, 27),
        ]);
        let calc = StreakCalculator::new();
        assert_eq!(calc.current_streak(&h, date(2, 27), &index), 6);
        // Saturday after: inactive, streak carries over
        assert_eq!(calc.current_streak(&h, date(2, 28), &index), 6);
    }

    #[test]
    fn test_traversal_cap_bounds_walk() {
        let h = habit(ScheduleSpec::Daily);
        let days: Vec<_> = date(1, 1).iter_days().take(40).collect();
        let index = done(&days);
        let calc = StreakCalculator::with_config(StreakConfig {
            lookback_days: 365,
            max_traversal_days: 10,
        });
        assert_eq!(calc.current_streak(&h, days[39], &index), 10);
    }

    #[test]
    fn test_never_schedule_has_no_streak() {
        let h = habit(ScheduleSpec::custom([]));
        let index = done(&[date(3, 1)]);
        let calc = StreakCalculator::new();
        assert_eq!(calc.current_streak(&h, date(3, 1), &index), 0);
        assert_eq!(calc.longest_streak(&h, date(3, 1), &index), 0);
    }

    #[test]
    fn test_longest_streak_finds_earlier_run() {
        let h = habit(ScheduleSpec::Daily);
        let mut days: Vec<_> = date(2, 1).iter_days().take(5).collect();
        days.push(date(2, 10));
        days.push(date(2, 11));
        let index = done(&days);
        let calc = StreakCalculator::new();
        assert_eq!(calc.longest_streak(&h, date(2, 11), &index), 5);
        assert_eq!(calc.current_streak(&h, date(2, 11), &index), 2);
    }

    #[test]
    fn test_longest_includes_current_beyond_window() {
        let h = habit(ScheduleSpec::Daily);
        let days: Vec<_> = date(1, 1).iter_days().take(30).collect();
        let index = done(&days);
        let calc = StreakCalculator::new();
        // Window of 5 days only sees 6 completions, current streak is 30
        assert_eq!(calc.longest_streak_within(&h, days[29], 5, &index), 30);
    }

    #[test]
    fn test_snapshot_matches_parts() {
        let h = habit(ScheduleSpec::Weekdays);
        // Thu 2026-02-19, Fri 2026-02-20, Mon 2026-02-23
        let index = done(&[date(2, 19), date(2, 20), date(2, 23)]);
        let calc = StreakCalculator::new();
        let snap = calc.snapshot(&h, date(2, 23), &index);
        assert_eq!(snap.habit_id, "h");
        assert_eq!(snap.current, 3);
        assert_eq!(snap.longest, 3);
        assert_eq!(snap.as_of, date(2, 23));
    }
}
