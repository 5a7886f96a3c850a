//! Profile CLI commands
//!
//! Handles: reprofile profile list/show/create/update/delete

use anyhow::Context;
use clap::Subcommand;
use reprofile_core::{AppConfig, ProfileError, ReportId};
use std::io::{self, Write};

use super::{open_manager, open_registry};

/// Profile commands
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// List all profiles
    List,
    /// Show a profile and its selected report
    Show {
        /// Profile name
        name: String,
    },
    /// Create a new profile
    Create {
        /// Profile name (no spaces nor \/<>?*:|"')
        name: String,
        /// Source connection name
        #[arg(short, long)]
        connection: String,
        /// Report identifier
        #[arg(short, long)]
        report: String,
    },
    /// Update an existing profile
    Update {
        /// Profile name
        name: String,
        /// New profile name
        #[arg(long)]
        rename: Option<String>,
        /// New source connection name
        #[arg(short, long)]
        connection: Option<String>,
        /// New report identifier
        #[arg(short, long)]
        report: Option<String>,
    },
    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Execute profile command
pub fn execute(cmd: ProfileCommands, config: &AppConfig) -> anyhow::Result<()> {
    let registry = open_registry(config)?;
    let mut manager = open_manager(config, &registry)?;

    match cmd {
        ProfileCommands::List => {
            let profiles = manager.list();
            if profiles.is_empty() {
                println!("No profiles found.");
            } else {
                println!("Profiles:");
                for p in profiles {
                    println!(
                        "  {} - {} (report {})",
                        p.name, p.source_connection_name, p.selected_report_id
                    );
                }
            }
        }
        ProfileCommands::Show { name } => {
            let selection = manager
                .select_profile(&name)?
                .ok_or_else(|| ProfileError::ProfileNotFound(name.clone()))?;
            let profile = &selection.profile;

            println!("Profile: {}", profile.name);
            println!("Connection: {}", profile.source_connection_name);
            match selection.selected_report() {
                Some(report) => println!("Report: {} ({})", report.name, report.id),
                None => println!(
                    "Report: {} (not in cached reports; run 'reprofile reports {} --refresh')",
                    profile.selected_report_id, profile.source_connection_name
                ),
            }
            println!("Created: {}", profile.created_at.format("%Y-%m-%d %H:%M"));
            println!("Updated: {}", profile.updated_at.format("%Y-%m-%d %H:%M"));
        }
        ProfileCommands::Create {
            name,
            connection,
            report,
        } => {
            let profile = manager.create_profile(&name, &connection, Some(ReportId::new(report)))?;
            println!("Profile '{}' saved.", profile.name);
        }
        ProfileCommands::Update {
            name,
            rename,
            connection,
            report,
        } => {
            let current = manager
                .find_by_name(&name)
                .cloned()
                .ok_or_else(|| ProfileError::ProfileNotFound(name.clone()))?;

            let new_name = rename.unwrap_or_else(|| current.name.clone());
            let connection = connection.unwrap_or_else(|| current.source_connection_name.clone());
            let report = report.map_or_else(|| current.selected_report_id.clone(), ReportId::new);

            let profile =
                manager.update_profile(&current.name, &new_name, &connection, Some(report))?;
            println!("Profile '{}' saved.", profile.name);
        }
        ProfileCommands::Delete { name, yes } => {
            let profile = manager
                .find_by_name(&name)
                .cloned()
                .ok_or_else(|| ProfileError::ProfileNotFound(name.clone()))?;

            if !yes && !confirm(&format!("Delete profile '{}'?", profile.name))? {
                println!("Cancelled.");
                return Ok(());
            }

            manager.delete_profile(&profile.name)?;
            println!("Profile '{}' deleted.", profile.name);
        }
    }

    manager.close()?;
    Ok(())
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read confirmation")?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}
