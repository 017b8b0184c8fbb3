//! Per-habit completion statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DayWindow;
use crate::calendar::Calendar;
use crate::habit::{is_active, is_live, CompletionIndex, Habit, StreakCalculator};

/// Streaks and completion rate for one habit over a trailing window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitStats {
    pub habit_id: String,
    pub as_of: NaiveDate,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Live, due days in the window
    pub scheduled_days: u32,
    /// Due days that were completed
    pub completed_days: u32,
    /// completed_days / scheduled_days (0.0 to 1.0)
    pub completion_rate: f64,
}

/// Compute stats over the `window_days` ending on `today`.
pub fn habit_stats(
    habit: &Habit,
    index: &CompletionIndex,
    today: NaiveDate,
    window_days: usize,
    calendar: &Calendar,
    streaks: &StreakCalculator,
) -> HabitStats {
    let window = DayWindow::ending_on(today, window_days);
    let mut scheduled_days = 0u32;
    let mut completed_days = 0u32;

    for day in window.iter() {
        if !is_live(habit, day, calendar) || !is_active(&habit.schedule, day) {
            continue;
        }
        scheduled_days += 1;
        if index.is_completed(&habit.id, day) {
            completed_days += 1;
        }
    }

    let completion_rate = if scheduled_days == 0 {
        0.0
    } else {
        completed_days as f64 / scheduled_days as f64
    };

    HabitStats {
        habit_id: habit.id.clone(),
        as_of: today,
        current_streak: streaks.current_streak(habit, today, index),
        longest_streak: streaks.longest_streak(habit, today, index),
        scheduled_days,
        completed_days,
        completion_rate,
    }
}
