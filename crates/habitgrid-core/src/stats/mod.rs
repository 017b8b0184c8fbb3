//! Aggregation and heatmap statistics.
//!
//! Data flows one way: habits and the completion index are summarized per
//! day, the summaries of a window feed a heat-level classifier, and the
//! classified days are laid out as week columns.

mod daily_summary;
mod habit_stats;
mod heat_level;
mod heatmap;

pub use daily_summary::{daily_summaries, summarize_day, DailySummary, DayWindow, MAX_WINDOW_DAYS};

pub use habit_stats::{habit_stats, HabitStats};

pub use heat_level::{nearest_rank_percentile, HeatLevel, HeatLevelClassifier, HeatThresholds};

pub use heatmap::{
    CellState, HeatCell, HeatGrid, HeatmapBuilder, HeatmapConfig, HeatmapView, MiniCell,
    MAX_HEATMAP_WEEKS,
};
