//! Reprofile CLI - Command-line interface for reprofile
//!
//! Provides `reprofile profile`, `reprofile connection`, `reprofile reports`
//! and `reprofile cache`.

mod commands;

use clap::{Parser, Subcommand};
use reprofile_core::config::load_app_config;
use reprofile_core::{AppConfig, ProfileError};
use reprofile_providers::FetchError;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use commands::cache::CacheCommands;
use commands::connection::ConnectionCommands;
use commands::profile::ProfileCommands;

#[derive(Parser)]
#[command(name = "reprofile")]
#[command(about = "Reprofile - report execution profile manager")]
#[command(version)]
struct Cli {
    /// Data directory (overrides REPROFILE_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage execution profiles
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },
    /// Inspect configured connections
    Connection {
        #[command(subcommand)]
        action: ConnectionCommands,
    },
    /// List reports for a connection
    Reports {
        /// Connection name
        connection: String,
        /// Fetch the report list from the connection before listing
        #[arg(long)]
        refresh: bool,
        /// Mark the report selected by this profile
        #[arg(long)]
        profile: Option<String>,
    },
    /// Inspect the report cache
    Cache {
        #[command(subcommand)]
        action: CacheCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match load_app_config() {
        Ok(mut config) => {
            if let Some(dir) = cli.data_dir {
                config.data_dir = dir;
            }
            config
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(&config);

    let result = match cli.command {
        Commands::Profile { action } => commands::profile::execute(action, &config),
        Commands::Connection { action } => commands::connection::execute(action, &config),
        Commands::Reports {
            connection,
            refresh,
            profile,
        } => commands::reports::execute(&connection, refresh, profile.as_deref(), &config),
        Commands::Cache { action } => commands::cache::execute(action, &config),
    };

    if let Err(e) = result {
        match profile_error(&e) {
            Some(profile_err) => eprintln!("Error [{}]: {profile_err}", profile_err.code()),
            None => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }
}

/// The profile error behind a command failure, including one raised while
/// storing fetched reports
fn profile_error(e: &anyhow::Error) -> Option<&ProfileError> {
    e.downcast_ref::<ProfileError>()
        .or_else(|| match e.downcast_ref::<FetchError>() {
            Some(FetchError::Storage(inner)) => Some(inner),
            _ => None,
        })
}

/// Log to stderr so command output stays clean; `RUST_LOG` wins over config
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
