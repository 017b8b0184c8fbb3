use chrono::NaiveDate;
use clap::Subcommand;
use habitgrid_core::{active_habits, CompletionRecord, Habit, ValidationError};

use super::{parse_schedule, print_json, start_of, CmdResult, Context};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a habit
    Add {
        /// Habit name
        name: String,
        /// daily, weekdays, or a day list such as mon,wed,fri
        #[arg(long, default_value = "daily")]
        schedule: String,
    },
    /// List habits
    List {
        /// Include archived habits
        #[arg(long)]
        all: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Archive a habit
    Archive {
        /// Habit ID
        id: String,
        /// First day the habit no longer counts (defaults to today)
        #[arg(long)]
        on: Option<NaiveDate>,
    },
    /// Mark a habit done for a day
    Check {
        /// Habit ID
        id: String,
        /// Day to mark (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Record the day as not done instead
        #[arg(long)]
        undo: bool,
    },
}

pub fn run(ctx: &Context, action: HabitAction) -> CmdResult {
    let config = ctx.config()?;

    match action {
        HabitAction::Add { name, schedule } => {
            let schedule = parse_schedule(&schedule)?;
            let mut snapshot = ctx.load_snapshot()?;
            let habit = Habit::new(name, schedule, ctx.now(&config));
            let id = habit.id.clone();
            snapshot.habits.push(habit);
            ctx.store_snapshot(&snapshot)?;
            tracing::info!(id = %id, "habit created");
            println!("{id}");
        }
        HabitAction::List { all, json } => {
            let snapshot = ctx.load_snapshot()?;
            let habits: Vec<&Habit> = if all {
                snapshot.habits.iter().collect()
            } else {
                active_habits(&snapshot.habits)
            };

            if json {
                print_json(&habits)?;
            } else if habits.is_empty() {
                println!("no habits");
            } else {
                for habit in habits {
                    let marker = if habit.is_archived { " (archived)" } else { "" };
                    println!(
                        "{}  {}  [{}]{marker}",
                        habit.id,
                        habit.name,
                        habit.schedule.label()
                    );
                }
            }
        }
        HabitAction::Archive { id, on } => {
            let mut snapshot = ctx.load_snapshot()?;
            let at = match on {
                Some(day) => start_of(day, &config),
                None => ctx.now(&config),
            };
            let habit = snapshot
                .habits
                .iter_mut()
                .find(|h| h.id == id)
                .ok_or_else(|| ValidationError::UnknownHabit(id.clone()))?;
            habit.archive(at);
            ctx.store_snapshot(&snapshot)?;
            println!("archived {id}");
        }
        HabitAction::Check { id, date, undo } => {
            let mut snapshot = ctx.load_snapshot()?;
            if snapshot.habit(&id).is_none() {
                return Err(ValidationError::UnknownHabit(id).into());
            }
            let day = date.unwrap_or_else(|| ctx.today(&config));
            snapshot
                .records
                .push(CompletionRecord::new(id.clone(), day, !undo));
            ctx.store_snapshot(&snapshot)?;
            let state = if undo { "not done" } else { "done" };
            println!("{id} {day}: {state}");
        }
    }
    Ok(())
}
