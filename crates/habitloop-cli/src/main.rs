use clap::{Parser, Subcommand};
use habitloop_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "habitloop", version, about = "Habitloop habit tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit management and completion tracking
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Day-boundary check
    Day {
        #[command(subcommand)]
        action: commands::day::DayAction,
    },
    /// Identity statement and evidence
    Identity {
        #[command(subcommand)]
        action: commands::identity::IdentityAction,
    },
    /// Progress statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Suggested habits
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Weekly goal, motivation and logging settings
    #[command(after_help = commands::config::KEYS_HELP)]
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// API key management for motivation messages
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
}

/// Logs go to stderr so stdout stays valid JSON.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Config::load_or_default().log.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Day { action } => commands::day::run(action),
        Commands::Identity { action } => commands::identity::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Catalog { action } => commands::catalog::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Auth { action } => commands::auth::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
