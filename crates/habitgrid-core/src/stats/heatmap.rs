//! Calendar heatmap grids.
//!
//! Grids are `week_count` columns of 7 days, column-major, starting on the
//! first weekday on/before the requested start. The aggregate grid carries
//! a 0-4 heat level per day; the per-habit mini grid carries a ternary state
//! since a single habit has no population to rank against.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{daily_summaries, DayWindow, HeatLevel, HeatLevelClassifier};
use crate::calendar::{add_days, Calendar};
use crate::habit::{is_active, is_live, CompletionIndex, Habit};

/// Named heatmap views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatmapView {
    /// Full-year view in the app
    Yearly,
    /// Home-screen widget "grass"
    Grass,
    /// Per-habit mini heatmap
    Mini,
}

/// Upper bound on week columns accepted from configuration and the CLI.
pub const MAX_HEATMAP_WEEKS: u32 = 520;

/// Week counts for each view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapConfig {
    #[serde(default = "default_yearly_weeks")]
    pub yearly_weeks: u32,
    #[serde(default = "default_grass_weeks")]
    pub grass_weeks: u32,
    #[serde(default = "default_mini_weeks")]
    pub mini_weeks: u32,
}

fn default_yearly_weeks() -> u32 {
    53
}
fn default_grass_weeks() -> u32 {
    14
}
fn default_mini_weeks() -> u32 {
    10
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            yearly_weeks: default_yearly_weeks(),
            grass_weeks: default_grass_weeks(),
            mini_weeks: default_mini_weeks(),
        }
    }
}

impl HeatmapConfig {
    pub fn weeks_for(&self, view: HeatmapView) -> u32 {
        match view {
            HeatmapView::Yearly => self.yearly_weeks,
            HeatmapView::Grass => self.grass_weeks,
            HeatmapView::Mini => self.mini_weeks,
        }
    }
}

/// One day of the aggregate heatmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatCell {
    pub day: NaiveDate,
    pub level: HeatLevel,
    pub is_today: bool,
    pub scheduled: usize,
    pub completed: usize,
}

/// Mini heatmap state for a single habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    /// Not due, not yet live, archived, or in the future
    Inactive,
    /// Due and not completed
    Pending,
    /// Due and completed
    Completed,
}

impl CellState {
    pub fn glyph(self) -> char {
        match self {
            CellState::Inactive => ' ',
            CellState::Pending => '·',
            CellState::Completed => '█',
        }
    }
}

/// One day of a per-habit mini heatmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniCell {
    pub day: NaiveDate,
    pub state: CellState,
    pub is_today: bool,
}

/// Column-major grid: `columns[week][weekday_row]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatGrid<C> {
    pub start: NaiveDate,
    pub columns: Vec<Vec<C>>,
}

impl<C> HeatGrid<C> {
    pub fn week_count(&self) -> usize {
        self.columns.len()
    }

    /// Cells in column-major order.
    pub fn cells(&self) -> impl Iterator<Item = &C> {
        self.columns.iter().flatten()
    }

    pub fn get(&self, week: usize, row: usize) -> Option<&C> {
        self.columns.get(week)?.get(row)
    }

    /// Cells of one weekday row across all weeks.
    pub fn row(&self, row: usize) -> impl Iterator<Item = &C> {
        self.columns.iter().filter_map(move |col| col.get(row))
    }
}

/// Builds heatmap grids for a calendar and view configuration.
#[derive(Debug, Clone, Default)]
pub struct HeatmapBuilder {
    calendar: Calendar,
    config: HeatmapConfig,
}

impl HeatmapBuilder {
    pub fn new(calendar: Calendar, config: HeatmapConfig) -> Self {
        Self { calendar, config }
    }

    pub fn config(&self) -> &HeatmapConfig {
        &self.config
    }

    /// First day of a grid of `weeks` columns whose last column contains `today`.
    pub fn window_start(&self, today: NaiveDate, weeks: u32) -> NaiveDate {
        let back = i64::from(weeks.saturating_sub(1)) * 7;
        add_days(self.calendar.start_of_week(today), -back)
    }

    /// Aggregate grid for a named view ending at `today`.
    pub fn view_grid(
        &self,
        view: HeatmapView,
        habits: &[Habit],
        index: &CompletionIndex,
        today: NaiveDate,
    ) -> HeatGrid<HeatCell> {
        let weeks = self.config.weeks_for(view);
        let start = self.window_start(today, weeks);
        self.build_grid(start, weeks, habits, index, today)
    }

    /// Aggregate multi-habit grid.
    ///
    /// The classifier is built from this grid's own days only.
    pub fn build_grid(
        &self,
        start_day: NaiveDate,
        week_count: u32,
        habits: &[Habit],
        index: &CompletionIndex,
        today: NaiveDate,
    ) -> HeatGrid<HeatCell> {
        let start = self.calendar.start_of_week(start_day);
        let window = DayWindow::new(start, week_count as usize * 7);
        let summaries = daily_summaries(habits, index, window, &self.calendar);
        let classifier = HeatLevelClassifier::from_summaries(summaries.values(), today);

        let cells: Vec<HeatCell> = summaries
            .values()
            .map(|summary| HeatCell {
                day: summary.day,
                level: classifier.classify(summary),
                is_today: summary.day == today,
                scheduled: summary.scheduled_count(),
                completed: summary.completed_count(),
            })
            .collect();

        HeatGrid {
            start,
            columns: into_columns(cells),
        }
    }

    /// Mini grid for a named view ending at `today`.
    pub fn mini_view_grid(
        &self,
        habit: &Habit,
        index: &CompletionIndex,
        today: NaiveDate,
    ) -> HeatGrid<MiniCell> {
        let weeks = self.config.mini_weeks;
        let start = self.window_start(today, weeks);
        self.build_mini(habit, start, weeks, index, today)
    }

    /// Per-habit grid with ternary state.
    pub fn build_mini(
        &self,
        habit: &Habit,
        start_day: NaiveDate,
        week_count: u32,
        index: &CompletionIndex,
        today: NaiveDate,
    ) -> HeatGrid<MiniCell> {
        let start = self.calendar.start_of_week(start_day);
        let window = DayWindow::new(start, week_count as usize * 7);

        let cells: Vec<MiniCell> = window
            .iter()
            .map(|day| {
                let scheduled = day <= today
                    && is_live(habit, day, &self.calendar)
                    && is_active(&habit.schedule, day);
                let state = if !scheduled {
                    CellState::Inactive
                } else if index.is_completed(&habit.id, day) {
                    CellState::Completed
                } else {
                    CellState::Pending
                };
                MiniCell {
                    day,
                    state,
                    is_today: day == today,
                }
            })
            .collect();

        HeatGrid {
            start,
            columns: into_columns(cells),
        }
    }

    /// Render an aggregate grid as text, one row per weekday.
    pub fn render_ascii(&self, grid: &HeatGrid<HeatCell>) -> String {
        let mut output = String::new();
        let names = self.row_names();

        for (row, name) in names.iter().enumerate() {
            output.push_str(&format!("{name:<4}"));
            for cell in grid.row(row) {
                output.push(if cell.is_today { '@' } else { cell.level.glyph() });
            }
            output.push('\n');
        }
        output.push_str("\nLegend: · 0  ░ 1  ▒ 2  ▓ 3  █ 4  @ today\n");
        output
    }

    /// Render a mini grid as text.
    pub fn render_mini_ascii(&self, grid: &HeatGrid<MiniCell>) -> String {
        let mut output = String::new();
        for (row, name) in self.row_names().iter().enumerate() {
            output.push_str(&format!("{name:<4}"));
            for cell in grid.row(row) {
                output.push(cell.state.glyph());
            }
            output.push('\n');
        }
        output
    }

    fn row_names(&self) -> [&'static str; 7] {
        const SUNDAY_FIRST: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
        let offset = self.calendar.week_start().weekday().num_days_from_sunday() as usize;
        std::array::from_fn(|i| SUNDAY_FIRST[(i + offset) % 7])
    }
}

fn into_columns<C>(cells: Vec<C>) -> Vec<Vec<C>> {
    let mut columns = Vec::with_capacity(cells.len() / 7 + 1);
    let mut iter = cells.into_iter().peekable();
    while iter.peek().is_some() {
        columns.push(iter.by_ref().take(7).collect());
    }
    columns
}
