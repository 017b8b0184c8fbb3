//! Engine facade used by app views and widget timeline providers.
//!
//! [`HabitEngine`] holds the configuration and the latest derived state. A
//! refresh rebuilds the state from a snapshot and swaps it in as a whole;
//! readers that still hold the previous [`EngineState`] keep a consistent
//! view. No computation here reads the system clock: `today` is always
//! supplied by the caller.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::calendar::Calendar;
use crate::error::{Result, ValidationError};
use crate::habit::{
    is_active, CompletionIndex, Habit, ScheduleSpec, StreakCalculator, StreakSnapshot,
};
use crate::stats::{
    daily_summaries, habit_stats, summarize_day, DailySummary, DayWindow, HabitStats, HeatCell,
    HeatGrid, HeatmapBuilder, HeatmapView, MiniCell,
};
use crate::storage::{Config, Snapshot, SnapshotProvider};

/// Immutable state derived from one snapshot.
#[derive(Debug, Default)]
pub struct EngineState {
    habits: Vec<Habit>,
    index: CompletionIndex,
}

impl EngineState {
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let index = CompletionIndex::build(&snapshot.records);
        Self {
            habits: snapshot.habits,
            index,
        }
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn index(&self) -> &CompletionIndex {
        &self.index
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }
}

/// Habit tracking and heatmap engine.
#[derive(Debug, Clone)]
pub struct HabitEngine {
    calendar: Calendar,
    streaks: StreakCalculator,
    heatmaps: HeatmapBuilder,
    state: Arc<EngineState>,
}

impl Default for HabitEngine {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl HabitEngine {
    /// Create an engine with an empty snapshot.
    pub fn new(config: &Config) -> Self {
        Self {
            calendar: config.calendar(),
            streaks: StreakCalculator::with_config(config.streak.clone()),
            heatmaps: HeatmapBuilder::new(config.calendar(), config.heatmap.clone()),
            state: Arc::new(EngineState::default()),
        }
    }

    /// Create an engine and load an initial snapshot.
    pub fn with_snapshot(config: &Config, snapshot: Snapshot) -> Self {
        let mut engine = Self::new(config);
        engine.refresh(snapshot);
        engine
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Current derived state. Cheap to clone and safe to hand to other threads.
    pub fn state(&self) -> Arc<EngineState> {
        Arc::clone(&self.state)
    }

    /// Replace the derived state with one built from `snapshot`.
    pub fn refresh(&mut self, snapshot: Snapshot) {
        let habits = snapshot.habits.len();
        let records = snapshot.records.len();
        self.state = Arc::new(EngineState::from_snapshot(snapshot));
        tracing::debug!(habits, records, "engine refreshed");
    }

    /// Load a snapshot from `provider` and refresh.
    pub fn refresh_from(&mut self, provider: &dyn SnapshotProvider) -> Result<()> {
        let snapshot = provider.load()?;
        self.refresh(snapshot);
        Ok(())
    }

    pub fn habit(&self, id: &str) -> Result<&Habit> {
        self.state
            .habit(id)
            .ok_or_else(|| ValidationError::UnknownHabit(id.to_string()).into())
    }

    pub fn is_active(&self, schedule: &ScheduleSpec, day: NaiveDate) -> bool {
        is_active(schedule, day)
    }

    pub fn current_streak(&self, habit: &Habit, as_of: NaiveDate) -> u32 {
        self.streaks.current_streak(habit, as_of, &self.state.index)
    }

    pub fn longest_streak(&self, habit: &Habit, as_of: NaiveDate) -> u32 {
        self.streaks.longest_streak(habit, as_of, &self.state.index)
    }

    pub fn streak_snapshot(&self, habit: &Habit, as_of: NaiveDate) -> StreakSnapshot {
        self.streaks.snapshot(habit, as_of, &self.state.index)
    }

    /// Per-day summaries over all habits, archived ones included.
    pub fn daily_summaries(&self, window: DayWindow) -> BTreeMap<NaiveDate, DailySummary> {
        daily_summaries(&self.state.habits, &self.state.index, window, &self.calendar)
    }

    /// Aggregate grid of `week_count` weeks starting at the week of `start_day`.
    pub fn heat_grid(&self, start_day: NaiveDate, week_count: u32, today: NaiveDate) -> HeatGrid<HeatCell> {
        self.heatmaps
            .build_grid(start_day, week_count, &self.state.habits, &self.state.index, today)
    }

    /// Per-habit grid of `week_count` weeks starting at the week of `start_day`.
    pub fn mini_heat_grid(
        &self,
        habit: &Habit,
        start_day: NaiveDate,
        week_count: u32,
        today: NaiveDate,
    ) -> HeatGrid<MiniCell> {
        self.heatmaps
            .build_mini(habit, start_day, week_count, &self.state.index, today)
    }

    /// Aggregate grid for a named view whose last column contains `today`.
    ///
    /// [`HeatmapView::Mini`] yields an aggregate grid of the mini size; use
    /// [`HabitEngine::mini_view_grid`] for the per-habit variant.
    pub fn view_grid(&self, view: HeatmapView, today: NaiveDate) -> HeatGrid<HeatCell> {
        self.heatmaps
            .view_grid(view, &self.state.habits, &self.state.index, today)
    }

    pub fn mini_view_grid(&self, habit: &Habit, today: NaiveDate) -> HeatGrid<MiniCell> {
        self.heatmaps.mini_view_grid(habit, &self.state.index, today)
    }

    pub fn heatmaps(&self) -> &HeatmapBuilder {
        &self.heatmaps
    }

    /// Widget progress for today.
    pub fn today_progress(&self, today: NaiveDate) -> DailySummary {
        summarize_day(&self.state.habits, &self.state.index, today, &self.calendar)
    }

    pub fn habit_stats(&self, habit: &Habit, today: NaiveDate, window_days: usize) -> HabitStats {
        habit_stats(
            habit,
            &self.state.index,
            today,
            window_days,
            &self.calendar,
            &self.streaks,
        )
    }
}
