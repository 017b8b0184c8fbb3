//! Whether a habit exists on a given day.

use chrono::NaiveDate;

use super::Habit;
use crate::calendar::Calendar;

/// A habit is live from its creation day up to, but not including, its
/// archive day. The `is_archived` flag is not consulted, so historical days
/// still count habits that were archived later.
pub fn is_live(habit: &Habit, day: NaiveDate, calendar: &Calendar) -> bool {
    if day < habit.created_on(calendar) {
        return false;
    }
    match habit.archived_on(calendar) {
        Some(archived) => day < archived,
        None => true,
    }
}

/// Habits for "current habit list" views: archived ones are dropped outright.
pub fn active_habits(habits: &[Habit]) -> Vec<&Habit> {
    habits.iter().filter(|h| !h.is_archived).collect()
}
