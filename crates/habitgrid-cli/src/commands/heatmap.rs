use chrono::NaiveDate;
use clap::Subcommand;
use habitgrid_core::{HeatCell, HeatGrid, HeatmapBuilder, HeatmapView, MAX_HEATMAP_WEEKS};

use super::{print_json, CmdResult, Context};

#[derive(Subcommand)]
pub enum HeatmapAction {
    /// Full-year heatmap
    Yearly {
        /// Output cells as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compact widget heatmap
    Grass {
        /// Output cells as JSON
        #[arg(long)]
        json: bool,
    },
    /// Done/pending grid for one habit
    Mini {
        /// Habit ID
        id: String,
        /// Output cells as JSON
        #[arg(long)]
        json: bool,
    },
    /// Aggregate heatmap over an explicit range
    Range {
        /// Any day in the first week
        #[arg(long)]
        from: NaiveDate,
        /// Number of week columns
        #[arg(
            long,
            default_value_t = 4,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_HEATMAP_WEEKS))
        )]
        weeks: u32,
        /// Output cells as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(ctx: &Context, action: HeatmapAction) -> CmdResult {
    let config = ctx.config()?;
    let engine = ctx.engine(&config)?;
    let today = ctx.today(&config);
    let builder = engine.heatmaps();

    match action {
        HeatmapAction::Yearly { json } => {
            show(builder, &engine.view_grid(HeatmapView::Yearly, today), json)?;
        }
        HeatmapAction::Grass { json } => {
            show(builder, &engine.view_grid(HeatmapView::Grass, today), json)?;
        }
        HeatmapAction::Mini { id, json } => {
            let habit = engine.habit(&id)?;
            let grid = engine.mini_view_grid(habit, today);
            if json {
                print_json(&grid)?;
            } else {
                println!("{} [{}]", habit.name, habit.schedule.label());
                print!("{}", builder.render_mini_ascii(&grid));
            }
        }
        HeatmapAction::Range { from, weeks, json } => {
            show(builder, &engine.heat_grid(from, weeks, today), json)?;
        }
    }
    Ok(())
}

fn show(builder: &HeatmapBuilder, grid: &HeatGrid<HeatCell>, json: bool) -> CmdResult {
    if json {
        print_json(grid)
    } else {
        print!("{}", builder.render_ascii(grid));
        Ok(())
    }
}
