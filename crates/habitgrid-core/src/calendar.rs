//! Day-granular calendar arithmetic.
//!
//! Every engine computation works on [`NaiveDate`] values. Instants are
//! normalized to a day in a fixed UTC offset, so results never depend on the
//! host's locale or time zone.

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, Offset, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// First column weekday for heatmap grids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }
}

/// A fixed calendar: UTC offset used to cut days plus the week-start convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    offset: FixedOffset,
    week_start: WeekStart,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::utc()
    }
}

impl Calendar {
    /// UTC days, weeks starting on Sunday.
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
            week_start: WeekStart::Sunday,
        }
    }

    /// Build a calendar from an offset in minutes east of UTC.
    ///
    /// Offsets outside ±24h fall back to UTC.
    pub fn new(utc_offset_minutes: i32, week_start: WeekStart) -> Self {
        let offset = utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        Self { offset, week_start }
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Normalize an instant to its calendar day.
    pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// First day of the week containing `day`.
    pub fn start_of_week(&self, day: NaiveDate) -> NaiveDate {
        let start = self.week_start.weekday().num_days_from_sunday();
        let current = day.weekday().num_days_from_sunday();
        let back = (current + 7 - start) % 7;
        add_days(day, -i64::from(back))
    }
}

/// Shift `day` by `n` days. Out-of-range results return `day` unchanged.
pub fn add_days(day: NaiveDate, n: i64) -> NaiveDate {
    let shifted = if n >= 0 {
        day.checked_add_days(Days::new(n.unsigned_abs()))
    } else {
        day.checked_sub_days(Days::new(n.unsigned_abs()))
    };
    shifted.unwrap_or(day)
}

/// Weekday number with 1 = Sunday ... 7 = Saturday.
pub fn weekday_number(day: NaiveDate) -> u8 {
    day.weekday().number_from_sunday() as u8
}

/// Iterate `count` consecutive days starting at `start`.
///
/// Iteration stops early if the calendar range is exhausted.
pub fn days_from(start: NaiveDate, count: usize) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take(count)
}
