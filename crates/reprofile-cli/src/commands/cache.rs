//! Cache CLI commands
//!
//! Handles: reprofile cache list

use clap::Subcommand;
use reprofile_core::AppConfig;

use super::{open_manager, open_registry};

/// Cache commands
#[derive(Subcommand)]
pub enum CacheCommands {
    /// List cached report lists per connection
    List,
}

/// Execute cache command
pub fn execute(cmd: CacheCommands, config: &AppConfig) -> anyhow::Result<()> {
    let registry = open_registry(config)?;
    let manager = open_manager(config, &registry)?;

    match cmd {
        CacheCommands::List => {
            let entries = manager.cached_connections()?;
            if entries.is_empty() {
                println!("No cached reports.");
            } else {
                println!("Cached reports:");
                for entry in entries {
                    println!(
                        "  {} - {} reports (fetched {})",
                        entry.connection_name,
                        entry.reports.len(),
                        entry.fetched_at.format("%Y-%m-%d %H:%M")
                    );
                }
            }
        }
    }

    manager.close()?;
    Ok(())
}
