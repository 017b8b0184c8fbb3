//! # Habitgrid Core Library
//!
//! This library provides the habit tracking and activity heatmap engine shared
//! by the Habitgrid app views, the home-screen widgets and the CLI. It is pure
//! computation over an in-memory snapshot of habits and completion records:
//! no I/O happens inside the engine, and `today` is always injected.
//!
//! ## Architecture
//!
//! - **Habits**: schedule evaluation, liveness by creation/archive date,
//!   completion index and streaks
//! - **Stats**: per-day summaries, percentile-based heat levels and week-column
//!   heatmap grids (yearly, widget "grass", per-habit mini)
//! - **Storage**: TOML configuration and JSON snapshot providers
//!
//! ## Key Components
//!
//! - [`HabitEngine`]: Facade rebuilt wholesale on every snapshot refresh
//! - [`StreakCalculator`]: Current and longest streaks
//! - [`HeatLevelClassifier`]: Window-local 0-4 heat levels
//! - [`HeatmapBuilder`]: Grid assembly and text rendering
//! - [`Config`]: Engine configuration management

pub mod calendar;
pub mod engine;
pub mod error;
pub mod habit;
pub mod stats;
pub mod storage;

pub use calendar::{Calendar, WeekStart};
pub use engine::{EngineState, HabitEngine};
pub use error::{ConfigError, CoreError, SnapshotError, ValidationError};
pub use habit::{
    active_habits, is_active, is_live, CompletionIndex, CompletionRecord, Habit, ScheduleSpec,
    StreakCalculator, StreakConfig, StreakSnapshot, MAX_STREAK_DAYS,
};
pub use stats::{
    daily_summaries, CellState, DailySummary, DayWindow, HabitStats, HeatCell, HeatGrid,
    HeatLevel, HeatLevelClassifier, HeatThresholds, HeatmapBuilder, HeatmapConfig, HeatmapView,
    MiniCell, MAX_HEATMAP_WEEKS, MAX_WINDOW_DAYS,
};
pub use storage::{Config, JsonSnapshotFile, Snapshot, SnapshotProvider};
