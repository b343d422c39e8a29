use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "taskline-cli", version, about = "Taskline CLI: task overlap detection and timeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which tasks have overlapping date ranges
    Conflicts(commands::conflicts::ConflictsArgs),
    /// Render the timeline: stats, overlap warnings and Gantt bars
    Timeline(commands::timeline::TimelineArgs),
    /// List the tasks one task conflicts with
    Check(commands::check::CheckArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Log to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Conflicts(args) => commands::conflicts::run(args),
        Commands::Timeline(args) => commands::timeline::run(args),
        Commands::Check(args) => commands::check::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
