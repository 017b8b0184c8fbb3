use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "habitgrid", version, about = "Habitgrid CLI")]
struct Cli {
    /// Habit snapshot file (JSON)
    #[arg(long, global = true, env = "HABITGRID_SNAPSHOT")]
    snapshot: Option<std::path::PathBuf>,

    /// Day treated as today (YYYY-MM-DD); defaults to the local date
    #[arg(long, global = true)]
    today: Option<chrono::NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Streaks, summaries and completion statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Activity heatmaps
    Heatmap {
        #[command(subcommand)]
        action: commands::heatmap::HeatmapAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn init_logging() {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("HABITGRID_LOG")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let ctx = commands::Context::new(cli.snapshot, cli.today);

    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(&ctx, action),
        Commands::Stats { action } => commands::stats::run(&ctx, action),
        Commands::Heatmap { action } => commands::heatmap::run(&ctx, action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "habitgrid", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
