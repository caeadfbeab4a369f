//! FieldPulse command-line agent.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fieldpulse",
    version = fieldpulse_core::VERSION,
    about = "Sample device sensors and microphone level, ship snapshots to a realtime store",
    long_about = None
)]
struct Cli {
    /// Path to a JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List sensor channels and whether each is available on this machine
    Scan,

    /// Run one manual sample-and-upload cycle
    Sample {
        /// Observation window in milliseconds
        #[arg(long)]
        window_ms: Option<u64>,

        /// Sample and print the snapshot without uploading
        #[arg(long)]
        dry_run: bool,
    },

    /// Run the background agent with periodic scheduled cycles
    Run {
        /// Minutes between scheduled cycles
        #[arg(long)]
        interval_minutes: Option<u64>,

        /// Also run one cycle immediately on startup
        #[arg(long)]
        kick: bool,
    },

    /// Show the resolved identity and upload counter
    Status,

    /// Delete all uploaded records for this identity and reset the counter
    Clear,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Scan => commands::scan::run(config_path),
        Commands::Sample { window_ms, dry_run } => {
            commands::sample::run(config_path, window_ms, dry_run)
        }
        Commands::Run {
            interval_minutes,
            kick,
        } => commands::run::run(config_path, interval_minutes, kick),
        Commands::Status => commands::status::run(config_path),
        Commands::Clear => commands::clear::run(config_path),
    }
}
