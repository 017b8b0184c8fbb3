use chrono::NaiveDate;
use clap::Subcommand;
use clap::builder::RangedU64ValueParser;
use habitgrid_core::{DayWindow, MAX_WINDOW_DAYS};
use serde::Serialize;

use super::{print_json, CmdResult, Context};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Current and longest streak for a habit
    Streak {
        /// Habit ID
        id: String,
    },
    /// Streaks and completion rate for a habit
    Habit {
        /// Habit ID
        id: String,
        /// Trailing window in days
        #[arg(long, default_value_t = 30, value_parser = window_days())]
        days: usize,
    },
    /// Progress for today across all live habits
    Today,
    /// Per-day summaries
    Summary {
        /// First day (defaults to `days - 1` days before today)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Number of days
        #[arg(long, default_value_t = 7, value_parser = window_days())]
        days: usize,
    },
}

fn window_days() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::new().range(1..=MAX_WINDOW_DAYS as u64)
}

#[derive(Serialize)]
struct DayRow<'a> {
    day: NaiveDate,
    scheduled: usize,
    completed: usize,
    completion_ratio: f64,
    scheduled_habits: &'a [String],
    completed_habits: &'a [String],
}

pub fn run(ctx: &Context, action: StatsAction) -> CmdResult {
    let config = ctx.config()?;
    let engine = ctx.engine(&config)?;
    let today = ctx.today(&config);

    match action {
        StatsAction::Streak { id } => {
            let habit = engine.habit(&id)?;
            print_json(&engine.streak_snapshot(habit, today))?;
        }
        StatsAction::Habit { id, days } => {
            let habit = engine.habit(&id)?;
            print_json(&engine.habit_stats(habit, today, days))?;
        }
        StatsAction::Today => {
            let summary = engine.today_progress(today);
            print_json(&DayRow {
                day: summary.day,
                scheduled: summary.scheduled_count(),
                completed: summary.completed_count(),
                completion_ratio: summary.completion_ratio(),
                scheduled_habits: &summary.scheduled_habits,
                completed_habits: &summary.completed_habits,
            })?;
        }
        StatsAction::Summary { from, days } => {
            let window = match from {
                Some(start) => DayWindow::new(start, days),
                None => DayWindow::ending_on(today, days),
            };
            let summaries = engine.daily_summaries(window);
            let rows: Vec<DayRow<'_>> = summaries
                .values()
                .map(|s| DayRow {
                    day: s.day,
                    scheduled: s.scheduled_count(),
                    completed: s.completed_count(),
                    completion_ratio: s.completion_ratio(),
                    scheduled_habits: &s.scheduled_habits,
                    completed_habits: &s.completed_habits,
                })
                .collect();
            print_json(&rows)?;
        }
    }
    Ok(())
}
