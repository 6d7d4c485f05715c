use clap::{CommandFactory, Parser, Subcommand};
use habit_tracker_core::{Config, ConfigError, MAX_GRID_WEEKS};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "habit-tracker-cli", version, about = "Habit Tracker CLI")]
struct Cli {
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
    /// Checklist of habits due on a day
    Today {
        /// Day to show (YYYY-MM-DD, default: today)
        #[arg(long, value_parser = commands::parse_date)]
        date: Option<chrono::NaiveDate>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Toggle a habit's completion for a day
    Check {
        /// Habit ID
        id: String,
        /// Day to toggle (YYYY-MM-DD, default: today)
        #[arg(long, value_parser = commands::parse_date)]
        date: Option<chrono::NaiveDate>,
    },
    /// Streaks and contribution grids
    Streaks {
        /// Weeks of history per grid (default: grid.weeks from config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_GRID_WEEKS)))]
        weeks: Option<u32>,
        /// Print JSON instead of the text grid
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

/// Logs go to stderr so command output stays machine-readable.
///
/// Without a usable config the filter comes from HABIT_TRACKER_LOG or "warn".
fn init_logging(config_filter: Option<&str>) {
    let filter = EnvFilter::try_from_env("HABIT_TRACKER_LOG")
        .or_else(|_| EnvFilter::try_new(config_filter.unwrap_or("warn")))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands, config: Result<Config, ConfigError>) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Habit { action } => commands::habit::run(action, &config?),
        Commands::Today { date, json } => commands::today::run(date, json, &config?),
        Commands::Check { id, date } => commands::check::run(&id, date, &config?),
        Commands::Streaks { weeks, json } => commands::streaks::run(weeks, json, &config?),
        Commands::Config { action } => commands::config::run(action, config),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "habit-tracker-cli", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load();
    init_logging(config.as_ref().ok().map(|c| c.logging.filter.as_str()));
    if let Err(e) = &config {
        tracing::debug!(error = %e, "configuration unavailable");
    }

    if let Err(e) = run(cli.command, config) {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
