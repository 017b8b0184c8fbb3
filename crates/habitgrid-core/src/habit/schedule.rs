//! Schedule evaluation: is a habit due on a given day?

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::calendar::weekday_number;

/// Which days a habit is due.
///
/// Custom day sets use 1 = Sunday ... 7 = Saturday. Numbers outside that
/// range never match, and an empty set is due on no day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "days", rename_all = "snake_case")]
pub enum ScheduleSpec {
    Daily,
    Weekdays,
    Custom(BTreeSet<u8>),
}

impl ScheduleSpec {
    /// Custom schedule from weekday numbers (1 = Sunday).
    pub fn custom(days: impl IntoIterator<Item = u8>) -> Self {
        ScheduleSpec::Custom(days.into_iter().collect())
    }

    /// Custom schedule from chrono weekdays.
    pub fn on(days: impl IntoIterator<Item = Weekday>) -> Self {
        Self::custom(days.into_iter().map(|d| d.number_from_sunday() as u8))
    }

    /// Short label for display.
    pub fn label(&self) -> String {
        match self {
            ScheduleSpec::Daily => "daily".to_string(),
            ScheduleSpec::Weekdays => "weekdays".to_string(),
            ScheduleSpec::Custom(days) => {
                let names: Vec<&str> = days
                    .iter()
                    .filter_map(|d| match d {
                        1 => Some("Sun"),
                        2 => Some("Mon"),
                        3 => Some("Tue"),
                        4 => Some("Wed"),
                        5 => Some("Thu"),
                        6 => Some("Fri"),
                        7 => Some("Sat"),
                        _ => None,
                    })
                    .collect();
                if names.is_empty() {
                    "never".to_string()
                } else {
                    names.join(",")
                }
            }
        }
    }
}

/// Whether a habit with `schedule` is due on `day`.
pub fn is_active(schedule: &ScheduleSpec, day: NaiveDate) -> bool {
    let weekday = weekday_number(day);
    match schedule {
        ScheduleSpec::Daily => true,
        // 2..=6 is Monday through Friday
        ScheduleSpec::Weekdays => (2..=6).contains(&weekday),
        ScheduleSpec::Custom(days) => days.contains(&weekday),
    }
}
