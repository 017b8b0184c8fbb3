//! Completion lookup by habit and day.

use chrono::NaiveDate;
use std::collections::HashMap;

use super::CompletionRecord;

/// `(habit id, day) -> record` lookup built from a flat record list.
///
/// The index is rebuilt wholesale whenever the record snapshot changes;
/// there is no incremental update path.
#[derive(Debug, Clone, Default)]
pub struct CompletionIndex {
    by_habit: HashMap<String, HashMap<NaiveDate, CompletionRecord>>,
    len: usize,
}

impl CompletionIndex {
    /// Build the index. When several records share a `(habit, day)` key,
    /// the last one in iteration order wins.
    pub fn build<'a>(records: impl IntoIterator<Item = &'a CompletionRecord>) -> Self {
        let mut by_habit: HashMap<String, HashMap<NaiveDate, CompletionRecord>> = HashMap::new();
        let mut seen = 0usize;
        let mut overridden = 0usize;

        for record in records {
            seen += 1;
            let days = by_habit.entry(record.habit_id.clone()).or_default();
            if days.insert(record.day, record.clone()).is_some() {
                overridden += 1;
            }
        }

        let len = seen - overridden;
        tracing::debug!(records = seen, overridden, habits = by_habit.len(), "completion index built");

        Self { by_habit, len }
    }

    /// Record for a habit on a day, if any.
    pub fn get(&self, habit_id: &str, day: NaiveDate) -> Option<&CompletionRecord> {
        self.by_habit.get(habit_id)?.get(&day)
    }

    /// True only if a record exists and is marked completed.
    pub fn is_completed(&self, habit_id: &str, day: NaiveDate) -> bool {
        self.get(habit_id, day)
            .map(|record| record.is_completed)
            .unwrap_or(false)
    }

    /// Number of distinct `(habit, day)` entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
