//! Connection CLI commands
//!
//! Handles: reprofile connection list

use clap::Subcommand;
use reprofile_core::AppConfig;

use super::open_registry;

/// Connection commands
#[derive(Subcommand)]
pub enum ConnectionCommands {
    /// List configured connections
    List,
}

/// Execute connection command
pub fn execute(cmd: ConnectionCommands, config: &AppConfig) -> anyhow::Result<()> {
    let registry = open_registry(config)?;

    match cmd {
        ConnectionCommands::List => {
            if registry.is_empty() {
                println!(
                    "No connections configured. Add them to {}",
                    config.connections_path().display()
                );
            } else {
                println!("Connections:");
                for c in registry.connections() {
                    println!("  {} - {}", c.name, c.url);
                }
            }
        }
    }

    Ok(())
}
