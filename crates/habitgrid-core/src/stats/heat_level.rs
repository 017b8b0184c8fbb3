//! Discrete heat levels for calendar heatmaps.
//!
//! Levels 0 and 4 are absolute (nothing done, everything done). Levels 1-3
//! are relative to the partial-completion days observed in the same window,
//! split at the 25th and 50th nearest-rank percentiles of their completed
//! counts. Each view builds its own classifier, so one day can land on
//! different levels in windows of different sizes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DailySummary;

/// Heat level of a day, 0 through 4.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum HeatLevel {
    #[default]
    None,
    Low,
    Medium,
    High,
    Full,
}

impl HeatLevel {
    pub fn as_u8(self) -> u8 {
        match self {
            HeatLevel::None => 0,
            HeatLevel::Low => 1,
            HeatLevel::Medium => 2,
            HeatLevel::High => 3,
            HeatLevel::Full => 4,
        }
    }

    /// Character for terminal rendering.
    pub fn glyph(self) -> char {
        match self {
            HeatLevel::None => '·',
            HeatLevel::Low => '░',
            HeatLevel::Medium => '▒',
            HeatLevel::High => '▓',
            HeatLevel::Full => '█',
        }
    }
}

impl From<HeatLevel> for u8 {
    fn from(level: HeatLevel) -> Self {
        level.as_u8()
    }
}

impl TryFrom<u8> for HeatLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(HeatLevel::None),
            1 => Ok(HeatLevel::Low),
            2 => Ok(HeatLevel::Medium),
            3 => Ok(HeatLevel::High),
            4 => Ok(HeatLevel::Full),
            other => Err(format!("heat level out of range: {other}")),
        }
    }
}

/// Nearest-rank percentile of an ascending slice. Empty input yields 1.
pub fn nearest_rank_percentile(p: u32, sorted: &[usize]) -> usize {
    if sorted.is_empty() {
        return 1;
    }
    let n = sorted.len();
    let rank = (n * p as usize).div_ceil(100).max(1);
    sorted[rank.min(n) - 1]
}

/// Window-local thresholds separating levels 1, 2 and 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatThresholds {
    pub q1: usize,
    pub q2: usize,
}

impl Default for HeatThresholds {
    fn default() -> Self {
        Self { q1: 1, q2: 1 }
    }
}

/// Classifier built from one window's summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatLevelClassifier {
    thresholds: HeatThresholds,
    today: NaiveDate,
}

impl HeatLevelClassifier {
    /// Gather the partial-completion population from non-future days and
    /// derive q1/q2 from it.
    pub fn from_summaries<'a>(
        summaries: impl IntoIterator<Item = &'a DailySummary>,
        today: NaiveDate,
    ) -> Self {
        let mut partials: Vec<usize> = summaries
            .into_iter()
            .filter(|s| s.day <= today && s.is_partial())
            .map(DailySummary::completed_count)
            .collect();
        partials.sort_unstable();

        let thresholds = HeatThresholds {
            q1: nearest_rank_percentile(25, &partials),
            q2: nearest_rank_percentile(50, &partials),
        };
        tracing::trace!(population = partials.len(), q1 = thresholds.q1, q2 = thresholds.q2, "heat thresholds");

        Self { thresholds, today }
    }

    pub fn thresholds(&self) -> HeatThresholds {
        self.thresholds
    }

    pub fn is_future(&self, day: NaiveDate) -> bool {
        day > self.today
    }

    /// Level for a summarized day.
    pub fn classify(&self, summary: &DailySummary) -> HeatLevel {
        if self.is_future(summary.day) {
            return HeatLevel::None;
        }
        self.level_for(summary.completed_count(), summary.scheduled_count())
    }

    /// Level for raw counts; ties at a threshold fall to the lower level.
    pub fn level_for(&self, completed: usize, scheduled: usize) -> HeatLevel {
        if scheduled == 0 || completed == 0 {
            HeatLevel::None
        } else if completed >= scheduled {
            HeatLevel::Full
        } else if completed <= self.thresholds.q1 {
            HeatLevel::Low
        } else if completed <= self.thresholds.q2 {
            HeatLevel::Medium
        } else {
            HeatLevel::High
        }
    }
}
